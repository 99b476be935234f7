//! Challenge selection.
//!
//! Which pattern and which question a session gets is a pure function of a
//! seed, so a session can be replayed exactly. The seed is expanded with
//! SHA-256 in counter mode.

use serde::Serialize;
use zkhuman_crypto::sha256_multi;
use zkhuman_types::VerificationParams;

/// Cells on the 3x3 pattern grid.
pub const PATTERN_CELLS: u8 = 9;

/// Category of a cognitive question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    WordAssociation,
    Logic,
    Sequence,
    Context,
}

/// A multiple-choice question with exactly one correct option.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CognitiveQuestion {
    pub kind: QuestionKind,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
}

impl CognitiveQuestion {
    /// `None` is a timeout and counts as wrong.
    pub fn check(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct)
    }

    /// Answer given `elapsed_secs` after the question opened; late answers are wrong.
    pub fn check_timed(&self, answer: Option<usize>, elapsed_secs: u64, limit_secs: u64) -> bool {
        elapsed_secs < limit_secs && self.check(answer)
    }
}

pub static QUESTION_BANK: [CognitiveQuestion; 4] = [
    CognitiveQuestion {
        kind: QuestionKind::WordAssociation,
        question: "What concept is most associated with \"Cryptography\"?",
        options: ["Security", "Cooking", "Dancing", "Weather"],
        correct: 0,
    },
    CognitiveQuestion {
        kind: QuestionKind::Logic,
        question: "If all ZK proofs are verifiable, and some verifications are instant, then:",
        options: [
            "All proofs are instant",
            "Some ZK proofs might verify instantly",
            "No proofs verify",
            "All verifications are proofs",
        ],
        correct: 1,
    },
    CognitiveQuestion {
        kind: QuestionKind::Sequence,
        question: "What comes next in the sequence: 1, 1, 2, 3, 5, 8, ?",
        options: ["11", "13", "10", "15"],
        correct: 1,
    },
    CognitiveQuestion {
        kind: QuestionKind::Context,
        question: "Which behavior indicates human-like reasoning?",
        options: [
            "Perfect calculation speed",
            "Intuitive pattern recognition",
            "Infinite memory storage",
            "Deterministic responses",
        ],
        correct: 1,
    },
];

/// A cell sequence to memorise and reproduce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternChallenge {
    pub sequence: Vec<u8>,
}

impl PatternChallenge {
    /// Exact, same-length reproduction only.
    pub fn check(&self, input: &[u8]) -> bool {
        input == self.sequence.as_slice()
    }
}

/// Everything a session asks the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChallengeSpec {
    pub seed: u64,
    pub pattern: PatternChallenge,
    pub cognitive: &'static CognitiveQuestion,
    pub cognitive_time_limit_secs: u64,
}

struct SeedStream {
    seed: [u8; 8],
    counter: u64,
}

impl SeedStream {
    fn new(seed: u64) -> Self {
        Self {
            seed: seed.to_be_bytes(),
            counter: 0,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let block = sha256_multi(&[b"zkhuman/challenge", &self.seed, &self.counter.to_be_bytes()]);
        self.counter += 1;
        let mut word = [0u8; 8];
        word.copy_from_slice(&block[..8]);
        u64::from_be_bytes(word)
    }

    /// Uniform-ish in `0..bound`; the modulo bias is irrelevant for a game.
    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound.max(1)
    }
}

/// Pick the challenges for a session from `seed`.
pub fn pick_challenge(seed: u64, params: &VerificationParams) -> ChallengeSpec {
    let mut stream = SeedStream::new(seed);

    // unvalidated params still get a bounded sequence
    let max_len = params.pattern_max_len.min(VerificationParams::MAX_PATTERN_LEN);
    let min_len = params.pattern_min_len.min(max_len);
    let span = (max_len - min_len) as u64 + 1;
    let len = min_len + stream.below(span) as usize;
    let sequence = (0..len)
        .map(|_| stream.below(PATTERN_CELLS as u64) as u8)
        .collect();

    let question = &QUESTION_BANK[stream.below(QUESTION_BANK.len() as u64) as usize];

    ChallengeSpec {
        seed,
        pattern: PatternChallenge { sequence },
        cognitive: question,
        cognitive_time_limit_secs: params.cognitive_time_limit_secs,
    }
}

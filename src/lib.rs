pub mod asr;
pub mod config;
pub mod feedback;
pub mod lexicon;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod text;
pub mod tts;

pub use asr::{GoogleSpeechClient, RecognizeError};
pub use config::AppConfig;
pub use feedback::{evaluate, ContrastRule, Verdict, NO_CONTRAST_LABEL};
pub use lexicon::PhonemeLexicon;
pub use pipeline::{score_sentence_round, score_word_round, RoundOutcome};
pub use prompts::{
    sentence_prompts, MinimalPair, PhonemeType, PracticeContent, PracticeLevel, SentencePrompt,
    TestingContent, WordPrompt,
};
pub use session::{PracticeSession, RoundResult, SessionEvent, SessionSummary};
pub use tts::GoogleTtsClient;

// 评分管道
//
// 把一整句转写变成一轮结果：取句末目标词 → 对比评估 → 整词命中统计
// 这里不触网、不触盘，识别与合成由 asr / tts 模块负责

use crate::feedback::{self, ContrastRule, Verdict};
use crate::lexicon::PhonemeLexicon;
use crate::session::RoundResult;
use crate::text;

/// 一轮评分的完整输出
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// 评估器给出的反馈
    pub verdict: Verdict,
    /// 写入会话的结果记录
    pub result: RoundResult,
}

/// 单词测试模式：对转写句末的目标词做音素级评估
///
/// `correct` 的口径与反馈相互独立：前者看整句是否包含目标词，
/// 后者只比较句末 token，两者与旧版行为保持一致
pub fn score_word_round(
    lexicon: &PhonemeLexicon,
    expected_word: &str,
    transcript: &str,
    rules: &[ContrastRule],
) -> RoundOutcome {
    let heard = text::final_token(transcript);
    let verdict = feedback::evaluate(lexicon, expected_word, &heard, rules);
    let correct = text::contains_word(transcript, expected_word);

    RoundOutcome {
        verdict,
        result: RoundResult {
            prompt: expected_word.to_string(),
            heard: if correct { "N/A".to_string() } else { heard },
            correct,
        },
    }
}

/// 句子练习模式：只看目标词是否被识别出来，不做音素比较
pub fn score_sentence_round(sentence: &str, target_word: &str, transcript: &str) -> RoundOutcome {
    let correct = text::contains_word(transcript, target_word);
    let message = if correct {
        format!("Good job! You pronounced '{}' correctly.", target_word)
    } else {
        format!(
            "You said '{}', but the correct word was '{}'.",
            transcript, target_word
        )
    };

    RoundOutcome {
        verdict: Verdict {
            message,
            contrast: None,
        },
        result: RoundResult {
            prompt: sentence.to_string(),
            heard: transcript.to_string(),
            correct,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NO_CONTRAST_LABEL;

    fn lexicon() -> &'static PhonemeLexicon {
        PhonemeLexicon::builtin()
    }

    #[test]
    fn test_word_round_correct() {
        let outcome = score_word_round(lexicon(), "pan", "I bought a new pan.", &[]);
        assert!(outcome.result.correct);
        assert_eq!(outcome.result.heard, "N/A");
        assert_eq!(outcome.verdict.message, "Your pronunciation was correct!");
        assert_eq!(outcome.verdict.contrast, None);
    }

    #[test]
    fn test_word_round_contrast_hit() {
        let rules = vec![ContrastRule::new("/pɛn/", "front vowel distinction")];
        let outcome = score_word_round(lexicon(), "pan", "I bought a new pen.", &rules);
        assert!(!outcome.result.correct);
        assert_eq!(outcome.result.heard, "pen");
        assert_eq!(
            outcome.verdict.message,
            "You said 'pen', but the correct word was 'pan' (front vowel distinction)."
        );
        assert_eq!(
            outcome.verdict.contrast.as_deref(),
            Some("front vowel distinction")
        );
    }

    #[test]
    fn test_word_round_empty_transcript() {
        let outcome = score_word_round(lexicon(), "pan", "", &[]);
        assert!(!outcome.result.correct);
        assert_eq!(outcome.result.heard, "");
        assert_eq!(outcome.verdict.contrast.as_deref(), Some(NO_CONTRAST_LABEL));
    }

    #[test]
    fn test_word_round_target_mid_sentence() {
        // 整句包含目标词即记为正确，即使句末 token 不是目标词
        let outcome = score_word_round(lexicon(), "pan", "the pan is hot", &[]);
        assert!(outcome.result.correct);
        // 反馈只看句末 token，这里 "hot" 不在词典中，走通用反馈
        assert_eq!(outcome.verdict.contrast.as_deref(), Some(NO_CONTRAST_LABEL));
    }

    #[test]
    fn test_sentence_round() {
        let outcome = score_sentence_round("The ship is big.", "ship", "the ship is big");
        assert!(outcome.result.correct);
        assert_eq!(
            outcome.verdict.message,
            "Good job! You pronounced 'ship' correctly."
        );

        let outcome = score_sentence_round("The ship is big.", "ship", "the sheep is big");
        assert!(!outcome.result.correct);
        assert_eq!(
            outcome.verdict.message,
            "You said 'the sheep is big', but the correct word was 'ship'."
        );
        assert_eq!(outcome.result.prompt, "The ship is big.");
    }
}

// 对比评估器
//
// 对一次"期望单词 vs 识别单词"的比较给出人类可读的反馈
// 纯函数，无 I/O、无内部状态，任意输入都有确定输出

use crate::lexicon::PhonemeLexicon;
use serde::{Deserialize, Serialize};

/// 未命中任何对比规则时的标签
pub const NO_CONTRAST_LABEL: &str = "No contrast found";

/// 音素对比规则
///
/// 由题目内容携带：某个"错误发音"的音标，以及对应的最小对立解释
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContrastRule {
    /// 预期会匹配到错误发音的 IPA 音标
    pub contrast_phoneme: String,
    /// 该对立的人类可读说明
    pub contrast_description: String,
}

impl ContrastRule {
    pub fn new(phoneme: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            contrast_phoneme: phoneme.into(),
            contrast_description: description.into(),
        }
    }
}

/// 一次比较的结论
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// 反馈文案，始终非空
    pub message: String,
    /// 命中的对比说明；发音完全正确时为 None，
    /// 未命中规则（或词典查不到）时为 `NO_CONTRAST_LABEL`
    pub contrast: Option<String>,
}

impl Verdict {
    /// 是否为"发音正确"结论
    pub fn is_correct(&self) -> bool {
        self.contrast.is_none()
    }
}

/// 比较期望单词与识别单词，返回反馈
///
/// 检查顺序（与历史行为保持一致）：
/// 1. 任一单词不在词典中 → 通用错误反馈 + `NO_CONTRAST_LABEL`，
///    即使两个单词字面相同也如此（词典未命中优先于字面相等，
///    是否应改为字面相等优先属产品层决策，这里保留原行为）
/// 2. 两词小写后相等 → 正确反馈，无对比标签
/// 3. 按给定顺序扫描规则，识别单词的音标与某条规则相等则命中，
///    首个命中即返回，不做特异性排序
/// 4. 无命中 → 通用错误反馈 + `NO_CONTRAST_LABEL`
pub fn evaluate(
    lexicon: &PhonemeLexicon,
    expected_word: &str,
    recognized_word: &str,
    rules: &[ContrastRule],
) -> Verdict {
    let recognized_phoneme = match (
        lexicon.lookup(expected_word),
        lexicon.lookup(recognized_word),
    ) {
        (Some(_), Some(recognized)) => recognized,
        _ => return mismatch(expected_word, recognized_word, None),
    };

    if expected_word.to_lowercase() == recognized_word.to_lowercase() {
        return Verdict {
            message: "Your pronunciation was correct!".to_string(),
            contrast: None,
        };
    }

    for rule in rules {
        if recognized_phoneme == rule.contrast_phoneme {
            return mismatch(
                expected_word,
                recognized_word,
                Some(&rule.contrast_description),
            );
        }
    }

    mismatch(expected_word, recognized_word, None)
}

/// 构造错误反馈；带说明时附在句尾括号内
fn mismatch(expected_word: &str, recognized_word: &str, description: Option<&str>) -> Verdict {
    match description {
        Some(description) => Verdict {
            message: format!(
                "You said '{}', but the correct word was '{}' ({}).",
                recognized_word, expected_word, description
            ),
            contrast: Some(description.to_string()),
        },
        None => Verdict {
            message: format!(
                "You said '{}', but the correct word was '{}'.",
                recognized_word, expected_word
            ),
            contrast: Some(NO_CONTRAST_LABEL.to_string()),
        },
    }
}

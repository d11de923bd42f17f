// 转写文本处理工具
//
// 独立模块，负责把识别服务返回的整句转写清洗成评估器需要的形态
// 被 pipeline、session、CLI 共享使用

/// 标准化单词（小写 + 去首尾空格）
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// 去除 token 首尾的 ASCII 标点
pub fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation())
}

/// 提取转写的最后一个 token，小写并去标点
///
/// 评估器只消费句末的目标词；转写为空时返回空串，
/// 空串在词典中必然未命中，会走通用错误反馈
pub fn final_token(transcript: &str) -> String {
    transcript
        .split_whitespace()
        .last()
        .map(|token| strip_punctuation(token).to_lowercase())
        .unwrap_or_default()
}

/// 判断转写中是否包含目标词（整词匹配，忽略大小写与标点）
pub fn contains_word(transcript: &str, word: &str) -> bool {
    let target: String = normalize_word(word)
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    if target.is_empty() {
        return false;
    }

    transcript
        .to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect::<String>()
        })
        .any(|token| token == target)
}

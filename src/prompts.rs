// 练习内容模型
//
// 对应两份 JSON 内容文件：
// - 测试内容：音素类型 → 音素 → 单词题目（含载体句与对比规则）
// - 练习内容：音素类型 → 对立名称 → 最小对立对（三个难度级别的句子）

use crate::feedback::ContrastRule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 音素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeType {
    Vowels,
    Diphthongs,
    Consonants,
}

impl PhonemeType {
    pub const ALL: [PhonemeType; 3] = [
        PhonemeType::Vowels,
        PhonemeType::Diphthongs,
        PhonemeType::Consonants,
    ];

    /// JSON 内容文件中的键名
    pub fn key(&self) -> &'static str {
        match self {
            PhonemeType::Vowels => "vowels",
            PhonemeType::Diphthongs => "diphthongs",
            PhonemeType::Consonants => "consonants",
        }
    }

    /// 学习者可见的名称
    pub fn display_name(&self) -> &'static str {
        match self {
            PhonemeType::Vowels => "Vowel",
            PhonemeType::Diphthongs => "Diphthong",
            PhonemeType::Consonants => "Consonant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vowels" | "vowel" => Some(PhonemeType::Vowels),
            "diphthongs" | "diphthong" => Some(PhonemeType::Diphthongs),
            "consonants" | "consonant" => Some(PhonemeType::Consonants),
            _ => None,
        }
    }
}

// ============================================================================
// 测试内容
// ============================================================================

/// 单词测试题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPrompt {
    /// 目标单词
    pub word: String,
    /// 目标单词的 IPA 音标（展示用）
    pub ipa: String,
    /// 载体句，学习者朗读整句
    pub sentence: String,
    /// 本题可能出现的混淆及其解释
    #[serde(default)]
    pub phonemic_contrast: Vec<ContrastRule>,
}

/// 音素 → 题目列表
pub type PromptGroups = BTreeMap<String, Vec<WordPrompt>>;

/// 测试内容文件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestingContent {
    #[serde(default)]
    pub vowels: PromptGroups,
    #[serde(default)]
    pub diphthongs: PromptGroups,
    #[serde(default)]
    pub consonants: PromptGroups,
}

impl TestingContent {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取测试内容文件 {:?}", path))?;
        let parsed: Self = serde_json::from_str(&content)
            .with_context(|| format!("测试内容文件 {:?} 格式错误", path))?;
        tracing::info!("已加载测试内容: {:?}", path);
        Ok(parsed)
    }

    pub fn section(&self, phoneme_type: PhonemeType) -> &PromptGroups {
        match phoneme_type {
            PhonemeType::Vowels => &self.vowels,
            PhonemeType::Diphthongs => &self.diphthongs,
            PhonemeType::Consonants => &self.consonants,
        }
    }

    /// 展开某一音素类型下的全部题目，作为一轮测试的顺序
    pub fn word_sequence(&self, phoneme_type: PhonemeType) -> Vec<&WordPrompt> {
        self.section(phoneme_type)
            .values()
            .flat_map(|prompts| prompts.iter())
            .collect()
    }
}

// ============================================================================
// 练习内容
// ============================================================================

/// 最小对立对及其三个级别的练习句
///
/// 每个级别给出两句，分别以 pair 的两个成员为目标词
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalPair {
    pub pair: [String; 2],
    pub level_1: [String; 2],
    pub level_2: [String; 2],
    pub level_3: [String; 2],
}

/// 对立名称 → 最小对立对列表
pub type PairGroups = BTreeMap<String, Vec<MinimalPair>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticeSections {
    #[serde(default)]
    pub vowels: PairGroups,
    #[serde(default)]
    pub diphthongs: PairGroups,
    #[serde(default)]
    pub consonants: PairGroups,
}

/// 练习内容文件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticeContent {
    #[serde(default)]
    pub phoneme_practice: PracticeSections,
}

impl PracticeContent {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取练习内容文件 {:?}", path))?;
        let parsed: Self = serde_json::from_str(&content)
            .with_context(|| format!("练习内容文件 {:?} 格式错误", path))?;
        tracing::info!("已加载练习内容: {:?}", path);
        Ok(parsed)
    }

    pub fn section(&self, phoneme_type: PhonemeType) -> &PairGroups {
        match phoneme_type {
            PhonemeType::Vowels => &self.phoneme_practice.vowels,
            PhonemeType::Diphthongs => &self.phoneme_practice.diphthongs,
            PhonemeType::Consonants => &self.phoneme_practice.consonants,
        }
    }

    /// 某一音素类型下可选的对立名称
    pub fn contrasts(&self, phoneme_type: PhonemeType) -> Vec<&str> {
        self.section(phoneme_type)
            .keys()
            .map(|k| k.as_str())
            .collect()
    }
}

/// 练习难度级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PracticeLevel {
    One,
    Two,
    Three,
}

impl PracticeLevel {
    pub const ALL: [PracticeLevel; 3] =
        [PracticeLevel::One, PracticeLevel::Two, PracticeLevel::Three];

    pub fn display_name(&self) -> &'static str {
        match self {
            PracticeLevel::One => "Level 1",
            PracticeLevel::Two => "Level 2",
            PracticeLevel::Three => "Level 3",
        }
    }

    fn sentences<'a>(&self, pair: &'a MinimalPair) -> &'a [String; 2] {
        match self {
            PracticeLevel::One => &pair.level_1,
            PracticeLevel::Two => &pair.level_2,
            PracticeLevel::Three => &pair.level_3,
        }
    }
}

/// 练习句：一句话和它的目标词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePrompt {
    pub sentence: String,
    pub target_word: String,
}

/// 按选定级别展开最小对立对为有序练习句
///
/// 每对展开为两句，目标词分别是 pair 的两个成员，保持列表顺序
pub fn sentence_prompts(pairs: &[MinimalPair], level: PracticeLevel) -> Vec<SentencePrompt> {
    let mut prompts = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        let sentences = level.sentences(pair);
        prompts.push(SentencePrompt {
            sentence: sentences[0].clone(),
            target_word: pair.pair[0].clone(),
        });
        prompts.push(SentencePrompt {
            sentence: sentences[1].clone(),
            target_word: pair.pair[1].clone(),
        });
    }
    prompts
}

// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ============================================================================
// 全局配置操作锁
// ============================================================================

lazy_static::lazy_static! {
    /// 全局配置操作锁
    ///
    /// 保护 config 的读写操作，防止并发 load->modify->save 导致的数据丢失
    pub static ref CONFIG_LOCK: Mutex<()> = Mutex::new(());
}

// ============================================================================
// 语音识别配置
// ============================================================================

/// 语音识别服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Web Speech API Key
    #[serde(default)]
    pub api_key: String,
    /// 识别语言（BCP-47）
    #[serde(default = "default_recognizer_language")]
    pub language: String,
    /// 音频采样率（Hz）
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_recognizer_language(),
            sample_rate_hz: default_sample_rate_hz(),
        }
    }
}

fn default_recognizer_language() -> String {
    "en-US".to_string()
}

fn default_sample_rate_hz() -> u32 {
    16_000
}

// ============================================================================
// 语音合成配置
// ============================================================================

/// 示例音频合成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// 是否启用示例音频
    #[serde(default = "default_tts_enabled")]
    pub enabled: bool,
    /// 合成语言
    #[serde(default = "default_tts_language")]
    pub language: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            enabled: default_tts_enabled(),
            language: default_tts_language(),
        }
    }
}

fn default_tts_enabled() -> bool {
    true
}

fn default_tts_language() -> String {
    "en".to_string()
}

// ============================================================================
// 练习内容配置
// ============================================================================

/// 内容文件路径；未设置的项使用内置数据
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// 测试内容 JSON（音素类型 → 音素 → 题目）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing_path: Option<PathBuf>,
    /// 练习内容 JSON（音素类型 → 对立 → 最小对立对）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_path: Option<PathBuf>,
    /// 自定义音素词典 JSON（`{"word": "/ipa/"}`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

// ============================================================================
// 应用配置
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub recognizer: RecognizerConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join("PronounceCoach");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("config.json"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 从指定路径加载；文件不存在或无法解析时回退到默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("配置文件 {:?} 不存在，使用默认配置", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::info!("已从 {:?} 加载配置", path);
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("解析配置失败，使用默认配置: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("配置已保存到 {:?}", path);
        Ok(())
    }
}

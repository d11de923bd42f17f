pub mod http;
pub mod utils;

pub use http::GoogleSpeechClient;

use thiserror::Error;

/// 识别失败的两类情形
///
/// 会话层把两者都映射为"识别失败"事件，但提示文案不同：
/// 听不清 → 请重试；服务不可用 → 检查网络
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// 服务可达，但无法听清音频内容
    #[error("could not understand the audio")]
    Unintelligible,
    /// 网络或服务端错误
    #[error("speech service unavailable: {0}")]
    Service(#[from] anyhow::Error),
}

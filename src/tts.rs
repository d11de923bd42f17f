// 发音示例合成
//
// 通过 Google Translate TTS 端点获取示例句的 MP3 音频，
// 供 CLI 保存到文件后由学习者播放；失败只影响示例，不中断会话

use crate::asr::utils;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;

const TTS_API_URL: &str = "https://translate.google.com/translate_tts";
const MAX_RETRIES: u32 = 2;

/// 单次请求的文本长度上限（该端点按短文本分片设计）
const MAX_TEXT_LEN: usize = 200;

#[derive(Clone)]
pub struct GoogleTtsClient {
    language: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl GoogleTtsClient {
    pub fn new(language: String) -> Self {
        Self {
            language,
            client: utils::create_http_client(),
            max_retries: MAX_RETRIES,
        }
    }

    /// 合成一段文本，返回 MP3 字节
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let text = text.trim();
        if text.is_empty() {
            bail!("合成文本不能为空");
        }
        if text.chars().count() > MAX_TEXT_LEN {
            bail!("合成文本过长（{} 字符，上限 {}）", text.chars().count(), MAX_TEXT_LEN);
        }

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tracing::warn!("第 {} 次重试语音合成...", attempt);
            }

            match self.synthesize_once(text).await {
                Ok(audio) => return Ok(audio),
                Err(e) => {
                    tracing::error!(
                        "语音合成失败 (尝试 {}/{}): {}",
                        attempt + 1,
                        self.max_retries + 1,
                        e
                    );
                    last_error = Some(e);

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("语音合成失败，未知错误")))
    }

    /// 合成并写入 MP3 文件
    pub async fn synthesize_to_file(&self, text: &str, path: &Path) -> Result<()> {
        let audio = self.synthesize(text).await?;
        tokio::fs::write(path, &audio)
            .await
            .with_context(|| format!("无法写入音频文件 {:?}", path))?;
        tracing::info!("示例音频已保存到 {:?} ({} bytes)", path, audio.len());
        Ok(())
    }

    async fn synthesize_once(&self, text: &str) -> Result<Vec<u8>> {
        let textlen = text.chars().count().to_string();
        tracing::info!("开始合成示例音频: {} 字符", textlen);

        let response = self
            .client
            .get(TTS_API_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", self.language.as_str()),
                ("client", "tw-ob"),
                ("total", "1"),
                ("idx", "0"),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .context("语音合成请求发送失败")?;

        let status = response.status();
        tracing::info!("TTS API 响应状态: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("TTS API 错误响应: {}", error_text);
            bail!("TTS API 请求失败 ({}): {}", status, error_text);
        }

        let audio = response.bytes().await.context("读取合成音频失败")?;
        if audio.is_empty() {
            bail!("TTS API 返回了空音频");
        }

        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let client = GoogleTtsClient::new("en".to_string());
        assert!(client.synthesize("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_text_rejected() {
        let client = GoogleTtsClient::new("en".to_string());
        let text = "a".repeat(MAX_TEXT_LEN + 1);
        assert!(client.synthesize(&text).await.is_err());
    }
}

use crate::asr::{utils, RecognizeError};
use anyhow::{anyhow, Context};
use std::path::Path;
use std::time::Duration;

const GOOGLE_SPEECH_API_URL: &str = "http://www.google.com/speech-api/v2/recognize";
const MAX_RETRIES: u32 = 2;

/// Google Web Speech API 客户端
///
/// 接收 FLAC 编码的音频，返回置信度最高的候选转写。
/// 空候选列表表示"听不清"（Unintelligible），与传输层错误区分开，
/// 前者重试没有意义，不进入重试循环
#[derive(Clone)]
pub struct GoogleSpeechClient {
    api_key: String,
    language: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl GoogleSpeechClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            language,
            client: utils::create_http_client(),
            max_retries: MAX_RETRIES,
        }
    }

    pub async fn recognize(
        &self,
        audio_path: &Path,
        sample_rate_hz: u32,
    ) -> Result<String, RecognizeError> {
        let audio_data = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("无法读取音频文件 {:?}", audio_path))?;
        self.recognize_bytes(&audio_data, sample_rate_hz).await
    }

    /// 识别一段 FLAC 音频，服务端错误自动重试
    pub async fn recognize_bytes(
        &self,
        audio_data: &[u8],
        sample_rate_hz: u32,
    ) -> Result<String, RecognizeError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tracing::warn!("第 {} 次重试识别...", attempt);
            }

            match self.recognize_once(audio_data, sample_rate_hz).await {
                Ok(text) => return Ok(text),
                // 听不清不重试，直接交给会话层处理
                Err(RecognizeError::Unintelligible) => return Err(RecognizeError::Unintelligible),
                Err(RecognizeError::Service(e)) => {
                    tracing::error!(
                        "识别失败 (尝试 {}/{}): {}",
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

        Err(RecognizeError::Service(
            last_error.unwrap_or_else(|| anyhow!("识别失败，未知错误")),
        ))
    }

    async fn recognize_once(
        &self,
        audio_data: &[u8],
        sample_rate_hz: u32,
    ) -> Result<String, RecognizeError> {
        tracing::info!("开始识别音频: {} bytes", audio_data.len());

        let response = self
            .client
            .post(GOOGLE_SPEECH_API_URL)
            .query(&[
                ("client", "chromium"),
                ("lang", self.language.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .header(
                "Content-Type",
                format!("audio/x-flac; rate={}", sample_rate_hz),
            )
            .body(audio_data.to_vec())
            .send()
            .await
            .context("语音识别请求发送失败")?;

        let status = response.status();
        tracing::info!("语音识别 API 响应状态: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("语音识别 API 错误响应: {}", error_text);
            return Err(RecognizeError::Service(anyhow!(
                "语音识别 API 请求失败 ({}): {}",
                status,
                error_text
            )));
        }

        let body = response.text().await.context("读取识别响应失败")?;
        let mut text = parse_transcript(&body)?;

        utils::strip_trailing_punctuation(&mut text);
        tracing::info!("识别完成: {}", text);
        Ok(text)
    }
}

/// 解析逐行 JSON 响应，取第一个非空结果的最高置信度候选
///
/// 该 API 先返回一行 `{"result":[]}` 占位，真正的结果在后续行；
/// 所有行都为空结果即为"听不清"
fn parse_transcript(body: &str) -> Result<String, RecognizeError> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(_) => continue,
        };

        let transcript = value["result"]
            .as_array()
            .and_then(|results| results.first())
            .and_then(|result| result["alternative"].as_array())
            .and_then(|alternatives| alternatives.first())
            .and_then(|alternative| alternative["transcript"].as_str());

        if let Some(transcript) = transcript {
            return Ok(transcript.to_string());
        }
    }

    Err(RecognizeError::Unintelligible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_skips_empty_placeholder() {
        let body = concat!(
            "{\"result\":[]}\n",
            "{\"result\":[{\"alternative\":[{\"transcript\":\"I bought a new pan\",",
            "\"confidence\":0.92}],\"final\":true}],\"result_index\":0}\n",
        );
        assert_eq!(parse_transcript(body).unwrap(), "I bought a new pan");
    }

    #[test]
    fn test_parse_transcript_empty_results_is_unintelligible() {
        let body = "{\"result\":[]}\n";
        assert!(matches!(
            parse_transcript(body),
            Err(RecognizeError::Unintelligible)
        ));
    }

    #[test]
    fn test_parse_transcript_blank_body_is_unintelligible() {
        assert!(matches!(
            parse_transcript(""),
            Err(RecognizeError::Unintelligible)
        ));
    }

    #[test]
    fn test_parse_transcript_ignores_malformed_lines() {
        let body = concat!(
            "not json\n",
            "{\"result\":[{\"alternative\":[{\"transcript\":\"pen\"}]}]}\n",
        );
        assert_eq!(parse_transcript(body).unwrap(), "pen");
    }
}

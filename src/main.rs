// 发音练习 CLI
//
// 交互式地走完一轮测试或练习序列：
// 逐题展示载体句，读取学习者的转写（直接输入文本，
// 或用 `@音频路径` 交给语音识别服务），给出音素级反馈，
// 结束时输出结果明细与正确率

use anyhow::{Context, Result};
use pronounce_coach::{
    asr::RecognizeError, score_sentence_round, score_word_round, session::render_results_table,
    AppConfig, GoogleSpeechClient, GoogleTtsClient, PhonemeLexicon, PhonemeType, PracticeContent,
    PracticeLevel, PracticeSession, RoundOutcome, SessionEvent, TestingContent,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = args.first().map(|s| s.as_str()).unwrap_or("test");
    let phoneme_type = args
        .get(1)
        .and_then(|s| PhonemeType::parse(s))
        .unwrap_or(PhonemeType::Vowels);

    let config = AppConfig::load()?;

    let lexicon = match &config.content.lexicon_path {
        Some(path) => PhonemeLexicon::from_json_file(path)?,
        None => PhonemeLexicon::builtin().clone(),
    };
    tracing::info!("词典就绪，共 {} 个词条", lexicon.len());

    let recognizer = GoogleSpeechClient::new(
        config.recognizer.api_key.clone(),
        config.recognizer.language.clone(),
    );
    let tts = config
        .tts
        .enabled
        .then(|| GoogleTtsClient::new(config.tts.language.clone()));

    match mode {
        "test" => {
            run_testing(&config, &lexicon, &recognizer, tts.as_ref(), phoneme_type).await
        }
        "practice" => {
            run_practice(&config, &recognizer, tts.as_ref(), phoneme_type).await
        }
        other => anyhow::bail!("未知模式: {}（支持 test / practice）", other),
    }
}

// ============================================================================
// 单词测试
// ============================================================================

async fn run_testing(
    config: &AppConfig,
    lexicon: &PhonemeLexicon,
    recognizer: &GoogleSpeechClient,
    tts: Option<&GoogleTtsClient>,
    phoneme_type: PhonemeType,
) -> Result<()> {
    let path = content_path(config.content.testing_path.as_deref(), "phoneme_testing.json");
    let content = TestingContent::load(&path)?;
    let prompts = content.word_sequence(phoneme_type);
    if prompts.is_empty() {
        anyhow::bail!("{} 测试内容为空", phoneme_type.display_name());
    }

    println!("=== {} Testing ===\n", phoneme_type.display_name());

    let mut session = PracticeSession::new(prompts.len());

    while !session.is_finished() {
        let prompt = prompts[session.current_index()];

        println!(
            "[{}/{}] Pronounce the word in this sentence:",
            session.current_index() + 1,
            session.total()
        );
        println!("  \"{}\"", prompt.sentence);
        println!("  IPA: {}", prompt.ipa);

        offer_audio_example(tts, &prompt.sentence).await;

        session.apply(SessionEvent::RecordingStarted);
        match read_transcript(recognizer, config.recognizer.sample_rate_hz).await {
            Some(transcript) => {
                println!("You said: {}", transcript);
                let outcome: RoundOutcome = score_word_round(
                    lexicon,
                    &prompt.word,
                    &transcript,
                    &prompt.phonemic_contrast,
                );
                println!("{}\n", outcome.verdict.message);
                session.apply(SessionEvent::AnswerSubmitted(outcome.result));
                session.apply(SessionEvent::PromptAdvanced);
            }
            None => {
                session.apply(SessionEvent::RecognitionFailed);
                if prompt_retry()? {
                    session.apply(SessionEvent::RetryRequested);
                } else {
                    session.apply(SessionEvent::PromptAdvanced);
                }
            }
        }
    }

    print_summary(&session, "words");
    Ok(())
}

// ============================================================================
// 最小对立对练习
// ============================================================================

async fn run_practice(
    config: &AppConfig,
    recognizer: &GoogleSpeechClient,
    tts: Option<&GoogleTtsClient>,
    phoneme_type: PhonemeType,
) -> Result<()> {
    let path = content_path(
        config.content.practice_path.as_deref(),
        "phoneme_practice.json",
    );
    let content = PracticeContent::load(&path)?;
    let contrasts = content.contrasts(phoneme_type);
    if contrasts.is_empty() {
        anyhow::bail!("{} 练习内容为空", phoneme_type.display_name());
    }

    println!("=== {} Practice ===\n", phoneme_type.display_name());

    // 选择对立
    println!("Choose a phonemic contrast:");
    for (i, contrast) in contrasts.iter().enumerate() {
        println!("  {}. {}", i + 1, contrast);
    }
    let choice = read_index(contrasts.len())?;
    let contrast = contrasts[choice].to_string();
    let pairs = &content.section(phoneme_type)[&contrast];

    // 选择级别
    println!("Choose practice level:");
    for (i, level) in PracticeLevel::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, level.display_name());
    }
    let level = PracticeLevel::ALL[read_index(PracticeLevel::ALL.len())?];

    let prompts = pronounce_coach::sentence_prompts(pairs, level);
    let mut session = PracticeSession::new(prompts.len());

    while !session.is_finished() {
        let prompt = &prompts[session.current_index()];

        println!(
            "\n[{}/{}] Contrast: {}",
            session.current_index() + 1,
            session.total(),
            contrast
        );
        println!("Pronounce the following sentence:");
        println!("  \"{}\"", prompt.sentence);

        offer_audio_example(tts, &prompt.sentence).await;

        session.apply(SessionEvent::RecordingStarted);
        match read_transcript(recognizer, config.recognizer.sample_rate_hz).await {
            Some(transcript) => {
                println!("You said: {}", transcript);
                let outcome =
                    score_sentence_round(&prompt.sentence, &prompt.target_word, &transcript);
                println!("{}", outcome.verdict.message);
                session.apply(SessionEvent::AnswerSubmitted(outcome.result));
                session.apply(SessionEvent::PromptAdvanced);
            }
            None => {
                session.apply(SessionEvent::RecognitionFailed);
                if prompt_retry()? {
                    session.apply(SessionEvent::RetryRequested);
                } else {
                    session.apply(SessionEvent::PromptAdvanced);
                }
            }
        }
    }

    print_summary(&session, "sentences");
    Ok(())
}

// ============================================================================
// 交互辅助
// ============================================================================

/// 解析内容文件路径：优先配置项，否则找工作目录下的 data/
fn content_path(configured: Option<&Path>, file_name: &str) -> PathBuf {
    match configured {
        Some(path) => path.to_path_buf(),
        None => Path::new("data").join(file_name),
    }
}

/// 读取一轮转写
///
/// 直接输入视为已转写文本；`@路径` 调用识别服务；
/// 听不清或服务出错返回 None，由调用方决定重试还是跳过
async fn read_transcript(recognizer: &GoogleSpeechClient, sample_rate_hz: u32) -> Option<String> {
    print!("Transcript (or @audio.flac): ");
    let _ = std::io::stdout().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return None;
    }
    let input = input.trim();

    if let Some(audio_path) = input.strip_prefix('@') {
        match recognizer
            .recognize(Path::new(audio_path.trim()), sample_rate_hz)
            .await
        {
            Ok(transcript) => Some(transcript),
            Err(RecognizeError::Unintelligible) => {
                println!("Could not understand the audio. Please try again.");
                None
            }
            Err(RecognizeError::Service(e)) => {
                println!("Speech service unavailable: {}", e);
                None
            }
        }
    } else if input.is_empty() {
        println!("Could not understand the audio. Please try again.");
        None
    } else {
        Some(input.to_string())
    }
}

/// 识别失败后询问重试还是继续
fn prompt_retry() -> Result<bool> {
    print!("Retry this prompt? [y/N]: ");
    let _ = std::io::stdout().flush();
    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("读取输入失败")?;
    Ok(matches!(input.trim(), "y" | "Y"))
}

/// 读取 1..=max 的序号，返回 0 起下标
fn read_index(max: usize) -> Result<usize> {
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("读取输入失败")?;
        match input.trim().parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n - 1),
            _ => println!("Please enter a number between 1 and {}.", max),
        }
    }
}

/// 合成并落盘示例音频，失败只提示不中断
async fn offer_audio_example(tts: Option<&GoogleTtsClient>, sentence: &str) {
    let Some(tts) = tts else {
        return;
    };

    let path = std::env::temp_dir().join("pronounce_coach_example.mp3");
    match tts.synthesize_to_file(sentence, &path).await {
        Ok(()) => println!("  Audio example saved to {:?}", path),
        Err(e) => tracing::warn!("示例音频合成失败: {}", e),
    }
}

fn print_summary(session: &PracticeSession, unit: &str) {
    let summary = session.summary();
    println!("\n=== Session Complete! ===");
    if session.results().is_empty() {
        println!("No results to display.");
        return;
    }

    println!("{}", render_results_table(session.results()));
    println!(
        "You pronounced {}/{} {} correctly ({:.1}%).",
        summary.correct,
        summary.total,
        unit,
        summary.accuracy() * 100.0
    );
}

// 练习会话状态机
//
// 把一轮练习的进度与标志收敛为调用方持有的显式结构，
// 状态只能通过离散事件推进，不依赖任何全局可变状态

use serde::Serialize;

/// 单轮结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    /// 本轮的题目（目标词或练习句）
    pub prompt: String,
    /// 学习者被听成了什么；正确时记为 "N/A"
    pub heard: String,
    /// 转写中是否包含目标词
    pub correct: bool,
}

/// 会话事件
///
/// 与旧版 UI 回调一一对应：开始录音、提交答案、识别失败、
/// 重试当前题、进入下一题、重置会话
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RecordingStarted,
    AnswerSubmitted(RoundResult),
    RecognitionFailed,
    RetryRequested,
    PromptAdvanced,
    SessionReset,
}

/// 练习会话
///
/// 一次会话按固定顺序走完 `total` 道题；每道题可经历
/// 录音 → 提交/失败 → 重试或继续 的循环
#[derive(Debug, Clone, Default)]
pub struct PracticeSession {
    total: usize,
    index: usize,
    has_answered: bool,
    recording: bool,
    error_occurred: bool,
    results: Vec<RoundResult>,
}

impl PracticeSession {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// 应用一个事件
    ///
    /// 与禁用按钮的语义一致：当前状态下不合法的事件被静默忽略
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::RecordingStarted => {
                if !self.is_finished() && !self.has_answered && !self.recording {
                    self.recording = true;
                }
            }
            SessionEvent::AnswerSubmitted(result) => {
                if self.recording {
                    self.results.push(result);
                    self.has_answered = true;
                    self.recording = false;
                }
            }
            SessionEvent::RecognitionFailed => {
                if self.recording {
                    self.has_answered = true;
                    self.error_occurred = true;
                    self.recording = false;
                }
            }
            SessionEvent::RetryRequested => {
                self.has_answered = false;
                self.error_occurred = false;
                self.recording = false;
            }
            SessionEvent::PromptAdvanced => {
                if !self.is_finished() {
                    self.index += 1;
                }
                self.has_answered = false;
                self.error_occurred = false;
                self.recording = false;
            }
            SessionEvent::SessionReset => {
                self.index = 0;
                self.has_answered = false;
                self.error_occurred = false;
                self.recording = false;
                self.results.clear();
            }
        }
    }

    /// 当前题目下标（0 起）
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_answered(&self) -> bool {
        self.has_answered
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn error_occurred(&self) -> bool {
        self.error_occurred
    }

    /// 全部题目是否已走完
    pub fn is_finished(&self) -> bool {
        self.index >= self.total
    }

    /// 进度比例（0.0 - 1.0），总数为 0 时为 0
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.index + 1).min(self.total) as f64 / self.total as f64
        }
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    /// 汇总当前已记录的结果
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.results.iter().filter(|r| r.correct).count(),
            total: self.results.len(),
        }
    }
}

/// 会话汇总统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub correct: usize,
    pub total: usize,
}

impl SessionSummary {
    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    /// 正确率（0.0 - 1.0），无结果时为 0
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// 渲染结果明细的纯文本表格
pub fn render_results_table(results: &[RoundResult]) -> String {
    let mut out = String::from("Prompt | Your Pronunciation | Correct\n");
    for result in results {
        out.push_str(&format!(
            "{} | {} | {}\n",
            result.prompt,
            result.heard,
            if result.correct { "yes" } else { "no" }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(prompt: &str, correct: bool) -> RoundResult {
        RoundResult {
            prompt: prompt.to_string(),
            heard: if correct { "N/A".to_string() } else { "pen".to_string() },
            correct,
        }
    }

    #[test]
    fn test_happy_path_round() {
        let mut session = PracticeSession::new(2);
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_finished());

        session.apply(SessionEvent::RecordingStarted);
        assert!(session.is_recording());

        session.apply(SessionEvent::AnswerSubmitted(answered("pan", true)));
        assert!(session.has_answered());
        assert!(!session.is_recording());
        assert_eq!(session.results().len(), 1);

        session.apply(SessionEvent::PromptAdvanced);
        assert_eq!(session.current_index(), 1);
        assert!(!session.has_answered());
    }

    #[test]
    fn test_recording_ignored_after_answer() {
        let mut session = PracticeSession::new(1);
        session.apply(SessionEvent::RecordingStarted);
        session.apply(SessionEvent::AnswerSubmitted(answered("pan", true)));

        // 已作答，再次开始录音应被忽略（按钮禁用语义）
        session.apply(SessionEvent::RecordingStarted);
        assert!(!session.is_recording());
    }

    #[test]
    fn test_answer_without_recording_ignored() {
        let mut session = PracticeSession::new(1);
        session.apply(SessionEvent::AnswerSubmitted(answered("pan", true)));
        assert!(session.results().is_empty());
        assert!(!session.has_answered());
    }

    #[test]
    fn test_recognition_failure_and_retry() {
        let mut session = PracticeSession::new(1);
        session.apply(SessionEvent::RecordingStarted);
        session.apply(SessionEvent::RecognitionFailed);
        assert!(session.error_occurred());
        assert!(session.has_answered());
        // 失败不产生结果记录
        assert!(session.results().is_empty());

        // 重试清除标志但停在当前题
        session.apply(SessionEvent::RetryRequested);
        assert!(!session.error_occurred());
        assert!(!session.has_answered());
        assert_eq!(session.current_index(), 0);

        session.apply(SessionEvent::RecordingStarted);
        assert!(session.is_recording());
    }

    #[test]
    fn test_failure_then_continue_skips_prompt() {
        let mut session = PracticeSession::new(2);
        session.apply(SessionEvent::RecordingStarted);
        session.apply(SessionEvent::RecognitionFailed);
        session.apply(SessionEvent::PromptAdvanced);
        assert_eq!(session.current_index(), 1);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_session_finishes_and_resets() {
        let mut session = PracticeSession::new(1);
        session.apply(SessionEvent::RecordingStarted);
        session.apply(SessionEvent::AnswerSubmitted(answered("pan", false)));
        session.apply(SessionEvent::PromptAdvanced);
        assert!(session.is_finished());

        // 结束后不再推进
        session.apply(SessionEvent::PromptAdvanced);
        assert_eq!(session.current_index(), 1);
        session.apply(SessionEvent::RecordingStarted);
        assert!(!session.is_recording());

        session.apply(SessionEvent::SessionReset);
        assert_eq!(session.current_index(), 0);
        assert!(session.results().is_empty());
        assert!(!session.is_finished());
    }

    #[test]
    fn test_summary_and_accuracy() {
        let mut session = PracticeSession::new(3);
        for correct in [true, false, true] {
            session.apply(SessionEvent::RecordingStarted);
            session.apply(SessionEvent::AnswerSubmitted(answered("pan", correct)));
            session.apply(SessionEvent::PromptAdvanced);
        }

        let summary = session.summary();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.total, 3);
        assert!((summary.accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = PracticeSession::new(0).summary();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.accuracy(), 0.0);
    }

    #[test]
    fn test_progress() {
        let mut session = PracticeSession::new(4);
        assert_eq!(session.progress(), 0.25);
        session.apply(SessionEvent::PromptAdvanced);
        assert_eq!(session.progress(), 0.5);
        assert_eq!(PracticeSession::new(0).progress(), 0.0);
    }

    #[test]
    fn test_render_results_table() {
        let results = vec![answered("pan", true), answered("cap", false)];
        let table = render_results_table(&results);
        assert!(table.contains("pan | N/A | yes"));
        assert!(table.contains("cap | pen | no"));
    }
}

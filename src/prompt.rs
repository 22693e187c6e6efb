//! Fixed instruction text sent with every generation request.
//!
//! The system instruction is shared by all modes; each [`ToolMode`] only
//! selects which task paragraph is placed in front of the user's text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// System instruction shared by every mode.
pub const SYSTEM_INSTRUCTION: &str = "너는 한국 고등학생의 대입 준비를 돕는 ‘입시 정보 정리 도우미’다.
사용자가 제공한 텍스트(복사해온 전형요강/공지/메모) 기반으로만 정리한다.
모르는 내용은 추측하지 말고 “확인 필요/모름”이라고 말한다.
전형/일정은 매년 변동될 수 있음을 고지하고, 필요 시 공식 출처(대학 입학처 공지/전형요강/교육부/대교협 등)를 확인하도록 안내한다.
특정 대학/전형을 단정적으로 추천하지 말고, 장단점과 확인해야 할 항목을 함께 제시한다.
출력 형식은 항상 다음 순서를 따르라:
1) 한눈에 보는 요약(3~5줄)
2) 핵심 포인트(불릿)
3) 다음 행동(체크리스트)";

/// Footer printed under every result.
pub const DISCLAIMER: &str = "전형/일정은 변동 가능, 최종 확인은 입학처/요강 원문에서 진행하세요.";

const SUMMARY_INSTRUCTION: &str = "작업: “대입 전형요강 핵심 요약”으로 정리해줘.
요구사항:
- 중요한 수치/제출서류/평가요소/일정이 있으면 포함하고, 없으면 없다고 명시해.
- 마지막에 “확인해야 할 원문 키워드/위치”를 제안해.";

const QUESTIONS_INSTRUCTION: &str = "작업: 면접/자소서 준비용 질문 생성.
요구사항:
- 기본 질문 10개 + 꼬리질문 10개를 만들어.
- 답변 작성 팁(근거/사례/수치/경험 연결)을 제시해.
- 위험한 답변(모호/과장/근거없음) 예시를 “피드백” 형태로 제시해.";

const STRATEGY_INSTRUCTION: &str = "작업: 입시 전략 비교 정리.
요구사항:
- 단정적 추천은 금지.
- 장단점/확인사항/리스크를 함께 제시해.
- “학생이 다음에 해야 할 일” 체크리스트를 제공해.
- 정보가 부족하면 “추가로 물어볼 질문” 목록도 제공해.";

/// The three tools offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Summary,
    Questions,
    Strategy,
}

/// Display metadata for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub title: &'static str,
    pub badge: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
}

impl ToolMode {
    pub const ALL: [ToolMode; 3] = [ToolMode::Summary, ToolMode::Questions, ToolMode::Strategy];

    /// Task paragraph placed before the user's text.
    pub fn instruction(self) -> &'static str {
        match self {
            ToolMode::Summary => SUMMARY_INSTRUCTION,
            ToolMode::Questions => QUESTIONS_INSTRUCTION,
            ToolMode::Strategy => STRATEGY_INSTRUCTION,
        }
    }

    pub fn info(self) -> ModeInfo {
        match self {
            ToolMode::Summary => ModeInfo {
                title: "요약",
                badge: "핵심 정리",
                description: "긴 모집요강에서 중요한 지원 자격과 일정을 빠르게 정리합니다.",
                placeholder: "전형요강/공지 원문을 붙여넣어 주세요.",
            },
            ToolMode::Questions => ModeInfo {
                title: "질문만들기",
                badge: "면접 대비",
                description: "학과/전형에 맞는 질문 리스트와 답변 포인트를 생성합니다.",
                placeholder: "면접/자소서 주제, 학과, 경험을 입력해 주세요.",
            },
            ToolMode::Strategy => ModeInfo {
                title: "전략",
                badge: "지원 전략",
                description: "현재 성적과 활동을 기반으로 지원 우선순위를 설계합니다.",
                placeholder: "내신/수능/희망학과/비교과 상황을 자세히 적어 주세요.",
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolMode::Summary => "summary",
            ToolMode::Questions => "questions",
            ToolMode::Strategy => "strategy",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" | "요약" => Ok(ToolMode::Summary),
            "questions" | "질문만들기" => Ok(ToolMode::Questions),
            "strategy" | "전략" => Ok(ToolMode::Strategy),
            other => Err(format!(
                "unknown mode '{other}' (expected summary, questions or strategy)"
            )),
        }
    }
}

/// Text of the single user turn: the mode's paragraph, a blank line, then
/// the trimmed input.
pub fn compose_user_text(mode: ToolMode, input: &str) -> String {
    format!("{}\n\n{}", mode.instruction(), input.trim())
}

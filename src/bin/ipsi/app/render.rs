use ipsi::prompt::DISCLAIMER;
use ipsi::{Outcome, StorageTarget, ToolMode, ViewState};

pub fn mode_line(mode: ToolMode) -> String {
    let info = mode.info();
    format!(
        "{:<10} {} [{}] {}",
        mode.as_str(),
        info.title,
        info.badge,
        info.description
    )
}

pub fn gate(view: &ViewState) -> String {
    let choice = |target: StorageTarget| {
        if view.gate.storage_target == target {
            format!("(*) {target}")
        } else {
            format!("( ) {target}")
        }
    };
    [
        "🎓 한국 고등학생 대입 입시 정보 허브".to_string(),
        "Gemini API Key를 입력하면 요약/질문 생성/전략 기능을 사용할 수 있어요.".to_string(),
        format!(
            "저장 위치: {}  {}",
            choice(StorageTarget::Durable),
            choice(StorageTarget::Session)
        ),
        "✅ 키는 이 컴퓨터에만 저장되며 Gemini 호출 외에는 전송하지 않습니다.".to_string(),
        "⚠️ 공용 PC에서는 사용 후 키 삭제(:clear)를 권장합니다.".to_string(),
        ":local | :session 저장 위치 선택, :save 키 입력 후 저장, :clear 초기화, :quit 종료"
            .to_string(),
    ]
    .join("\n")
}

const GUIDE: &str = "\
작성 가이드
  • 대상 대학/학과, 전형명, 지원 조건을 함께 적으면 정확도가 올라갑니다.
  • 성적은 최근 기준(예: 3학년 1학기)으로 작성해 현실적인 전략을 받아보세요.
  • 결과는 참고용이며, 최종 판단은 대학 입학처 공지로 확인하세요.";

pub fn workspace(view: &ViewState) -> String {
    let tabs = ToolMode::ALL
        .iter()
        .map(|mode| {
            let title = mode.info().title;
            if *mode == view.active_tab {
                format!("[{title}]")
            } else {
                format!(" {title} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let info = view.active_tab.info();
    format!(
        "📚 대입 입시 분석 대시보드\n{tabs}\n{} 입력: {}\n\n{GUIDE}\n\n텍스트를 입력한 뒤 :run 으로 실행합니다. (:help 도움말)",
        info.title, info.placeholder
    )
}

pub fn prompt(view: &ViewState) -> String {
    if view.gate_open() {
        format!("key:{}> ", view.gate.storage_target)
    } else if view.loading {
        "생성 중...> ".to_string()
    } else {
        format!("{}> ", view.active_tab.info().title)
    }
}

pub fn outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Result(text) => format!("── 분석 결과 ──\n{text}\n\n{DISCLAIMER}"),
        Outcome::Error(text) => format!("── 오류 안내 ──\n{text}\n\n{DISCLAIMER}"),
        Outcome::Notice(text) => text.clone(),
    }
}

pub const HELP: &str = "\
:tab <summary|questions|strategy>  탭 전환 (결과가 지워집니다)
:run                               현재 입력으로 실행
:show                              현재 입력 보기
:reset                             입력 지우기
:clear                             저장된 API Key 삭제
:quit                              종료
그 외의 줄은 입력 내용에 추가됩니다.";

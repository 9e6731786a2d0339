//! Domain layer
//! 실행 설정, 코멘트 태그 정책, 트리거 컨텍스트를 외부 의존성 없이 표현한다.

pub mod event;
pub mod outcome;
pub mod policy;
pub mod run;

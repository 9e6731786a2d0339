//! Interface layer
//! 액션 입력 파싱과 실행 조합(composition root)을 담당한다.

pub mod cli;
pub mod composition;

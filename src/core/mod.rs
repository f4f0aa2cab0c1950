// Core Domain
// ルーチンモデル、型記述子、Go中間表現とプリンタなどの純粋なロジック

pub mod code_writer;
pub mod config;
pub mod enums;
pub mod error;
pub mod function;
pub mod go_ast;
pub mod go_printer;
pub mod go_types;
pub mod imports;
pub mod naming;
pub mod type_descriptor;
pub mod zero_values;

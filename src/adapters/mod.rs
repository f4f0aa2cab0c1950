// Adapters
// データベース、ファイルシステム、外部フォーマッタへのアクセスを抽象化

pub mod catalog;
pub mod connection_string;
pub mod database;
pub mod source_writer;

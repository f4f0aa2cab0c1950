// pgfuncgenライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメイン（型記述子、ルーチンモデル、Go構文木とプリンタ）
// - adapters: カタログ問い合わせ、DB接続、ファイル出力
// - services: 型解決、イントロスペクション、コード合成のパイプライン

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;

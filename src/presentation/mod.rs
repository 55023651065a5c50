/// プレゼンテーション層モジュール
///
/// ライブラリの操作結果とユーザーとの入出力の橋渡しを行います。
///
/// # モジュール
/// - `input`: 認証情報の入力（環境変数・stdin）
/// - `output`: コマンド結果の出力（人間向け・機械向け）

pub mod input;
pub mod output;

use crate::commands::result::CommandResult;

/// ヘルプコマンドを実行する
pub fn execute() -> CommandResult {
    CommandResult::Help
}

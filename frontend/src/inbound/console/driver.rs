//! Line-oriented console loop over a [`RecordManager`].
//!
//! Input and output are generic async streams so the loop can be driven from
//! byte buffers in tests and from stdin/stdout in the binary.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::command::{Command, CommandParseError, HELP_TEXT};
use super::render::ListScreen;
use crate::domain::{
    CommitOutcome, DeleteOutcome, EditBuffer, MountOutcome, RecordManager, RecordView,
};

const PROMPT: &str = "> ";
const LOGIN_NOTICE: &str = "No stored session. Sign in first, then start the console again.\n";

/// Why the console loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No session was stored, so the list was never shown.
    LoginRequired,
    /// The operator quit, or input ended.
    Quit,
}

/// What the console prints after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the list, preceded by an optional notice.
    Redraw(Option<String>),
    /// Print a notice without redrawing.
    Notice(String),
    /// Print command help.
    Help,
    /// Leave the loop.
    Quit,
}

/// Mount the manager and serve commands until `quit` or end of input.
///
/// # Errors
///
/// Returns an I/O error when reading input or writing output fails. Remote
/// failures never surface here; they are shown on the list screen.
pub async fn run_console<R, W>(
    manager: &mut RecordManager,
    input: R,
    output: &mut W,
) -> io::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if manager.mount().await == MountOutcome::RedirectToLogin {
        write_text(output, LOGIN_NOTICE).await?;
        return Ok(SessionEnd::LoginRequired);
    }
    write_screen(output, manager.view()).await?;

    let mut lines = input.lines();
    loop {
        write_text(output, PROMPT).await?;
        let Some(line) = lines.next_line().await? else {
            return Ok(SessionEnd::Quit);
        };
        let reply = match line.parse::<Command>() {
            Ok(command) => dispatch(manager, command).await,
            Err(CommandParseError::Empty) => continue,
            Err(error) => {
                debug!(error = %error, "rejected console input");
                Reply::Notice(format!("error: {error} (type `help` for commands)"))
            }
        };
        match reply {
            Reply::Redraw(notice) => {
                if let Some(notice) = notice {
                    write_line(output, &notice).await?;
                }
                write_screen(output, manager.view()).await?;
            }
            Reply::Notice(notice) => write_line(output, &notice).await?,
            Reply::Help => write_text(output, HELP_TEXT).await?,
            Reply::Quit => return Ok(SessionEnd::Quit),
        }
    }
}

/// Apply one command to the manager.
pub async fn dispatch(manager: &mut RecordManager, command: Command) -> Reply {
    match command {
        Command::Next => match manager.advance_page().await {
            Some(_) => Reply::Redraw(None),
            None => Reply::Notice("already on the last page".to_owned()),
        },
        Command::Previous => match manager.retreat_page().await {
            Some(_) => Reply::Redraw(None),
            None => Reply::Notice("already on the first page".to_owned()),
        },
        Command::Page(page) => match manager.go_to_page(page).await {
            Some(_) => Reply::Redraw(None),
            None => Reply::Notice(format!(
                "page {page} is past the last page ({})",
                manager.view().bounds().total()
            )),
        },
        Command::Reload => {
            manager.reload().await;
            Reply::Redraw(None)
        }
        Command::Edit(id) => {
            if manager.begin_edit_by_id(id) {
                Reply::Redraw(None)
            } else {
                Reply::Notice(format!("user #{id} is not on this page"))
            }
        }
        Command::Set { field, value } => {
            if manager.update_edit_field(field, value) {
                Reply::Redraw(None)
            } else {
                no_open_edit()
            }
        }
        Command::Save => {
            let target = manager.view().edit_buffer().map(EditBuffer::target);
            match (manager.commit_edit().await, target) {
                (CommitOutcome::Saved, Some(id)) => Reply::Redraw(Some(format!("saved user #{id}"))),
                (CommitOutcome::Saved | CommitOutcome::Failed, _) => Reply::Redraw(None),
                (CommitOutcome::NothingToCommit, _) => no_open_edit(),
            }
        }
        Command::Cancel => {
            if manager.view().edit_buffer().is_none() {
                return no_open_edit();
            }
            manager.cancel_edit();
            Reply::Redraw(None)
        }
        Command::Delete(id) => match manager.delete_record(id).await {
            DeleteOutcome::Deleted => Reply::Redraw(Some(format!("deleted user #{id}"))),
            DeleteOutcome::Failed => Reply::Redraw(None),
        },
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit,
    }
}

fn no_open_edit() -> Reply {
    Reply::Notice("no edit is open; use `edit <id>` first".to_owned())
}

async fn write_screen<W>(output: &mut W, view: &RecordView) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_text(output, &ListScreen::new(view).to_string()).await
}

async fn write_line<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    write_text(output, &format!("{text}\n")).await
}

async fn write_text<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pagination::PageNumber;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{FixtureSession, FixtureUsersGateway, MockUsersGateway};
    use crate::domain::UserId;
    use crate::test_support::{RecordingUsersGateway, user_record};

    #[fixture]
    fn manager() -> RecordManager {
        RecordManager::new(
            Arc::new(FixtureUsersGateway::new()),
            Arc::new(FixtureSession::signed_in()),
        )
    }

    async fn drive(manager: &mut RecordManager, script: &str) -> (SessionEnd, String) {
        let mut output = Vec::new();
        let end = run_console(manager, script.as_bytes(), &mut output)
            .await
            .expect("console runs");
        (end, String::from_utf8(output).expect("utf-8 output"))
    }

    #[rstest]
    #[tokio::test]
    async fn signed_out_console_hands_over_to_login() {
        let mut gateway = MockUsersGateway::new();
        gateway.expect_list_users().times(0);
        let mut manager =
            RecordManager::new(Arc::new(gateway), Arc::new(FixtureSession::signed_out()));

        let (end, output) = drive(&mut manager, "next\n").await;

        assert_eq!(end, SessionEnd::LoginRequired);
        assert_eq!(output, LOGIN_NOTICE);
    }

    #[rstest]
    #[tokio::test]
    async fn end_of_input_quits_after_the_first_screen(mut manager: RecordManager) {
        let (end, output) = drive(&mut manager, "").await;

        assert_eq!(end, SessionEnd::Quit);
        assert!(output.starts_with("Users List\n"));
        assert!(output.contains("#1 George Bluth <george.bluth@reqres.in>"));
        assert!(output.contains("Page 1 of 2  [next]"));
    }

    #[rstest]
    #[tokio::test]
    async fn paging_past_the_end_prints_a_notice(mut manager: RecordManager) {
        let (_, output) = drive(&mut manager, "next\nnext\nq\n").await;

        assert!(output.contains("Page 2 of 2  [prev]"));
        assert!(output.contains("already on the last page"));
        assert_eq!(manager.view().current_page().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn edit_and_save_updates_the_record(mut manager: RecordManager) {
        let (_, output) =
            drive(&mut manager, "edit 2\nset first_name Jane\nsave\nquit\n").await;

        assert!(output.contains("      First Name: Jane"));
        assert!(output.contains("saved user #2"));
        let record = manager.view().record(UserId::new(2)).expect("record 2");
        assert_eq!(record.first_name(), "Jane");
        assert!(manager.view().edit_buffer().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_the_card(mut manager: RecordManager) {
        let (_, output) = drive(&mut manager, "rm 3\nq\n").await;

        assert!(output.contains("deleted user #3"));
        assert!(manager.view().record(UserId::new(3)).is_none());
    }

    #[rstest]
    #[case("save\n", "no edit is open")]
    #[case("set email x@y.z\n", "no edit is open")]
    #[case("edit 9\n", "user #9 is not on this page")]
    #[case("page 5\n", "page 5 is past the last page (2)")]
    #[case("prev\n", "already on the first page")]
    #[case("jump\n", "error: unknown command 'jump' (type `help` for commands)")]
    #[case("help\n", "set <field> <value...>")]
    #[tokio::test]
    async fn prints_notices(mut manager: RecordManager, #[case] script: &str, #[case] expected: &str) {
        let (_, output) = drive(&mut manager, script).await;
        assert!(output.contains(expected), "missing '{expected}' in:\n{output}");
    }

    #[rstest]
    #[tokio::test]
    async fn blank_lines_only_reprompt(mut manager: RecordManager) {
        let (_, output) = drive(&mut manager, "\n   \nq\n").await;
        assert_eq!(output.matches("Users List").count(), 1);
        assert_eq!(output.matches(PROMPT).count(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn reload_fetches_the_current_page_again() {
        let gateway = RecordingUsersGateway::new();
        gateway.set_page(
            PageNumber::FIRST,
            vec![user_record(1, "George", "Bluth")],
            1,
        );
        let mut manager = RecordManager::new(
            Arc::new(gateway.clone()),
            Arc::new(FixtureSession::signed_in()),
        );

        let (end, output) = drive(&mut manager, "reload\nq\n").await;

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(output.matches("Users List").count(), 2);
        assert_eq!(
            gateway.listed_pages(),
            vec![PageNumber::FIRST, PageNumber::FIRST]
        );
    }
}

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Restores cooked mode on every exit path.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads a line without echoing it, printing `*` per character.
/// Returns `None` when the user cancels with Esc or Ctrl-C.
pub fn read_masked(prompt: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut buffer = String::new();
    let accepted = {
        let _guard = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match apply_key(&mut buffer, key) {
                MaskedKey::Echo => write!(stdout, "*")?,
                MaskedKey::Erase => write!(stdout, "\x08 \x08")?,
                MaskedKey::Submit => break true,
                MaskedKey::Cancel => break false,
                MaskedKey::Ignore => {}
            }
            stdout.flush()?;
        }
    };
    writeln!(stdout)?;
    Ok(accepted.then_some(buffer))
}

#[derive(Debug, PartialEq, Eq)]
enum MaskedKey {
    Echo,
    Erase,
    Submit,
    Cancel,
    Ignore,
}

fn apply_key(buffer: &mut String, key: KeyEvent) -> MaskedKey {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => MaskedKey::Cancel,
        KeyCode::Esc => MaskedKey::Cancel,
        KeyCode::Enter => MaskedKey::Submit,
        KeyCode::Backspace => {
            if buffer.pop().is_some() {
                MaskedKey::Erase
            } else {
                MaskedKey::Ignore
            }
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            MaskedKey::Echo
        }
        _ => MaskedKey::Ignore,
    }
}

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    Some(key.code)
}

/// Whether the event asks to leave: `q`, or `Ctrl-C` since raw mode swallows the signal
pub(super) fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key.code == KeyCode::Char('q')
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    }
}

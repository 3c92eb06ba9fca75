//! Key parsing: raw escape sequences to normalized key ids.
//!
//! Only legacy sequences are handled (CSI arrows, SS3, control bytes, alt
//! chords). Key ids are lowercase names with `+`-joined modifiers, e.g.
//! `"up"`, `"ctrl+c"`, `"alt+x"`, `"shift+tab"`.

/// Best-effort normalization of a raw input sequence into a key id.
///
/// Returns `None` when the sequence is not a recognized key (printable text
/// is handled separately by [`parse_text`]).
pub fn parse_key(data: &str) -> Option<String> {
    if let Some(key_id) = legacy_sequence_key_id(data) {
        return Some(key_id.to_string());
    }

    if data == "\x1b" {
        return Some("escape".to_string());
    }
    if data == "\x1c" {
        return Some("ctrl+\\".to_string());
    }
    if data == "\x1d" {
        return Some("ctrl+]".to_string());
    }
    if data == "\x1f" {
        return Some("ctrl+-".to_string());
    }
    if data == "\t" {
        return Some("tab".to_string());
    }
    if data == "\r" || data == "\n" || data == "\x1bOM" {
        return Some("enter".to_string());
    }
    if data == "\x00" {
        return Some("ctrl+space".to_string());
    }
    if data == "\x7f" || data == "\x08" {
        return Some("backspace".to_string());
    }
    if data == "\x1b[Z" {
        return Some("shift+tab".to_string());
    }
    if data == "\x1b\r" {
        return Some("alt+enter".to_string());
    }
    if data == "\x1b " {
        return Some("alt+space".to_string());
    }
    if data == "\x1b\x7f" || data == "\x1b\x08" {
        return Some("alt+backspace".to_string());
    }
    if data.len() == 2 && data.starts_with('\x1b') {
        let code = data.as_bytes()[1];
        if (1..=26).contains(&code) {
            let ch = (code + 96) as char;
            return Some(format!("ctrl+alt+{}", ch));
        }
        if (97..=122).contains(&code) {
            let ch = code as char;
            return Some(format!("alt+{}", ch));
        }
    }
    if data == "\x1b[A" {
        return Some("up".to_string());
    }
    if data == "\x1b[B" {
        return Some("down".to_string());
    }
    if data == "\x1b[C" {
        return Some("right".to_string());
    }
    if data == "\x1b[D" {
        return Some("left".to_string());
    }
    if data == "\x1b[H" || data == "\x1bOH" {
        return Some("home".to_string());
    }
    if data == "\x1b[F" || data == "\x1bOF" {
        return Some("end".to_string());
    }
    if data == "\x1b[2~" {
        return Some("insert".to_string());
    }
    if data == "\x1b[3~" {
        return Some("delete".to_string());
    }
    if data == "\x1b[5~" {
        return Some("pageUp".to_string());
    }
    if data == "\x1b[6~" {
        return Some("pageDown".to_string());
    }
    if let Some(modified) = modified_arrow_key_id(data) {
        return Some(modified);
    }

    if data.len() == 1 {
        let code = data.as_bytes()[0];
        if (1..=26).contains(&code) {
            let ch = (code + 96) as char;
            return Some(format!("ctrl+{}", ch));
        }
        if (32..=126).contains(&code) {
            return Some(data.to_string());
        }
    }

    None
}

/// Decodes `\x1b[1;<mod><final>` arrow/home/end chords (xterm style).
fn modified_arrow_key_id(data: &str) -> Option<String> {
    let body = data.strip_prefix("\x1b[1;")?;
    if body.len() != 2 {
        return None;
    }
    let modifier = body.as_bytes()[0];
    let key = match body.as_bytes()[1] {
        b'A' => "up",
        b'B' => "down",
        b'C' => "right",
        b'D' => "left",
        b'H' => "home",
        b'F' => "end",
        _ => return None,
    };
    let prefix = match modifier {
        b'2' => "shift",
        b'3' => "alt",
        b'5' => "ctrl",
        _ => return None,
    };
    Some(format!("{prefix}+{key}"))
}

fn legacy_sequence_key_id(data: &str) -> Option<&'static str> {
    match data {
        "\x1bOA" => Some("up"),
        "\x1bOB" => Some("down"),
        "\x1bOC" => Some("right"),
        "\x1bOD" => Some("left"),
        "\x1b[1~" | "\x1b[7~" => Some("home"),
        "\x1b[4~" | "\x1b[8~" => Some("end"),
        "\x1b[[5~" => Some("pageUp"),
        "\x1b[[6~" => Some("pageDown"),
        "\x1b[a" => Some("shift+up"),
        "\x1b[b" => Some("shift+down"),
        "\x1b[c" => Some("shift+right"),
        "\x1b[d" => Some("shift+left"),
        "\x1bOa" => Some("ctrl+up"),
        "\x1bOb" => Some("ctrl+down"),
        "\x1bOc" => Some("ctrl+right"),
        "\x1bOd" => Some("ctrl+left"),
        "\x1bOP" | "\x1b[11~" | "\x1b[[A" => Some("f1"),
        "\x1bOQ" | "\x1b[12~" | "\x1b[[B" => Some("f2"),
        "\x1bOR" | "\x1b[13~" | "\x1b[[C" => Some("f3"),
        "\x1bOS" | "\x1b[14~" | "\x1b[[D" => Some("f4"),
        "\x1b[15~" | "\x1b[[E" => Some("f5"),
        "\x1b[17~" => Some("f6"),
        "\x1b[18~" => Some("f7"),
        "\x1b[19~" => Some("f8"),
        "\x1b[20~" => Some("f9"),
        "\x1b[21~" => Some("f10"),
        "\x1b[23~" => Some("f11"),
        "\x1b[24~" => Some("f12"),
        "\x1bb" => Some("alt+left"),
        "\x1bf" => Some("alt+right"),
        "\x1bp" => Some("alt+up"),
        "\x1bn" => Some("alt+down"),
        _ => None,
    }
}

/// Returns the printable text carried by a raw sequence, if any.
///
/// Text is any non-empty run with no escape bytes and no C0 controls; a lone
/// space counts as text (key dispatch sees it first as `"space"` only when
/// text parsing is skipped by the caller).
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if data
        .chars()
        .all(|ch| !ch.is_control() || ch == '\u{a0}')
    {
        return Some(data.to_string());
    }
    None
}

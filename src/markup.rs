//! # Marcação de Negrito nos Textos
//!
//! Prompts, labels e dicas usam `**trecho**` para destacar palavras.
//! [`segments`] divide o texto em trechos simples e destacados; cada
//! apresentação decide como desenhar o destaque (`<strong>` no HTML,
//! ANSI bold no terminal).

use std::sync::OnceLock;

use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("invalid regex"))
}

/// Divide `text` em trechos, na ordem original.
///
/// Um `**` sem par é mantido como texto simples.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in bold_pattern().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::Plain(&text[last..whole.start()]));
        }
        out.push(Segment::Bold(inner.as_str()));
        last = whole.end();
    }
    if last < text.len() {
        out.push(Segment::Plain(&text[last..]));
    }
    out
}

/// Remove os marcadores, mantendo só o texto.
pub fn plain(text: &str) -> String {
    segments(text)
        .into_iter()
        .map(|s| match s {
            Segment::Plain(t) | Segment::Bold(t) => t,
        })
        .collect()
}

//! Minimal rich-text subset used by post content: `**bold**`, `*italic*`,
//! and lines starting with `• ` rendered as bullets. Anything else is plain
//! text; unmatched markers stay literal.

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Line {
    pub bullet: bool,
    pub spans: Vec<Span>,
}

const BULLET_PREFIX: &str = "\u{2022} ";

/// Parses post content into display lines.
#[must_use]
pub fn parse(content: &str) -> Vec<Line> {
    content
        .lines()
        .map(|line| {
            let (bullet, rest) = match line.strip_prefix(BULLET_PREFIX) {
                Some(rest) => (true, rest),
                None => (false, line),
            };
            Line {
                bullet,
                spans: parse_spans(rest),
            }
        })
        .collect()
}

// split("**") alternates outside/inside chunks; an odd chunk is only a real
// bold run when a closing marker followed, i.e. when it is not the last.
fn parse_spans(text: &str) -> Vec<Span> {
    let chunks: Vec<&str> = text.split("**").collect();
    let mut spans = Vec::new();
    for (index, chunk) in chunks.iter().enumerate() {
        let inside = index % 2 == 1;
        if inside && index + 1 < chunks.len() {
            if !chunk.is_empty() {
                spans.push(Span::Bold((*chunk).to_owned()));
            }
        } else if inside {
            // Unmatched opener, restore the literal marker.
            spans.push(Span::Plain(format!("**{chunk}")));
        } else {
            push_italics(&mut spans, chunk);
        }
    }
    spans
}

fn push_italics(spans: &mut Vec<Span>, text: &str) {
    let chunks: Vec<&str> = text.split('*').collect();
    for (index, chunk) in chunks.iter().enumerate() {
        let inside = index % 2 == 1;
        if inside && index + 1 < chunks.len() {
            if !chunk.is_empty() {
                spans.push(Span::Italic((*chunk).to_owned()));
            }
        } else if inside {
            spans.push(Span::Plain(format!("*{chunk}")));
        } else if !chunk.is_empty() {
            spans.push(Span::Plain((*chunk).to_owned()));
        }
    }
}

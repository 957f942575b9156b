//! Tolerant HTML fragment parser.
//!
//! Handles what route fragments contain in practice: nested elements,
//! quoted/unquoted/boolean attributes, void and self-closing elements,
//! comments and raw-text elements (`script`, `style`, ...). Doctypes and
//! processing instructions are dropped. Stray closing tags are ignored and
//! unclosed elements are closed at end of input. Text is kept verbatim.

use crate::dom::fragment::FragmentNode;
use crate::dom::node::{ElementData, NodeData};
use crate::dom::serialize::{is_raw_text, is_void};

enum Token {
    Text(String),
    Comment(String),
    Open { data: ElementData, self_closing: bool },
    Close(String),
}

struct Open {
    data: ElementData,
    children: Vec<FragmentNode>,
}

/// Parse `html` into top-level fragment nodes.
pub fn parse_fragment(html: &str) -> Vec<FragmentNode> {
    let mut lexer = Lexer { src: html, pos: 0 };
    let mut roots: Vec<FragmentNode> = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    while let Some(token) = lexer.next_token() {
        match token {
            Token::Text(text) => push(&mut stack, &mut roots, FragmentNode::text(text)),
            Token::Comment(text) => push(&mut stack, &mut roots, FragmentNode::comment(text)),
            Token::Open { data, self_closing } => {
                if self_closing || is_void(&data.tag) {
                    push(&mut stack, &mut roots, FragmentNode::element(data, Vec::new()));
                } else if is_raw_text(&data.tag) {
                    let text = lexer.raw_text(&data.tag);
                    let children = if text.is_empty() {
                        Vec::new()
                    } else {
                        vec![FragmentNode::text(text)]
                    };
                    push(&mut stack, &mut roots, FragmentNode::element(data, children));
                } else {
                    stack.push(Open {
                        data,
                        children: Vec::new(),
                    });
                }
            }
            Token::Close(tag) => {
                if let Some(depth) = stack.iter().rposition(|open| open.data.tag == tag) {
                    while stack.len() > depth {
                        if let Some(open) = stack.pop() {
                            let node = FragmentNode::element(open.data, open.children);
                            push(&mut stack, &mut roots, node);
                        }
                    }
                }
            }
        }
    }

    while let Some(open) = stack.pop() {
        let node = FragmentNode::element(open.data, open.children);
        push(&mut stack, &mut roots, node);
    }

    roots
}

fn push(stack: &mut [Open], roots: &mut Vec<FragmentNode>, node: FragmentNode) {
    let siblings = match stack.last_mut() {
        Some(open) => &mut open.children,
        None => roots,
    };
    // Adjacent text runs (e.g. split at a literal '<') are merged
    if let NodeData::Text(text) = &node.data {
        if let Some(NodeData::Text(prev)) = siblings.last_mut().map(|n| &mut n.data) {
            prev.push_str(text);
            return;
        }
    }
    siblings.push(node);
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.src.len() {
                return None;
            }
            let rest = self.rest();

            if rest.starts_with("<!--") {
                let body_start = self.pos + 4;
                return Some(match self.src[body_start..].find("-->") {
                    Some(offset) => {
                        let text = self.src[body_start..body_start + offset].to_string();
                        self.pos = body_start + offset + 3;
                        Token::Comment(text)
                    }
                    None => {
                        let text = self.src[body_start..].to_string();
                        self.pos = self.src.len();
                        Token::Comment(text)
                    }
                });
            }

            if rest.starts_with("</") {
                let end = rest.find('>').map_or(self.src.len(), |i| self.pos + i);
                let name = self.src[self.pos + 2..end]
                    .split_ascii_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                self.pos = (end + 1).min(self.src.len());
                return Some(Token::Close(name));
            }

            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.pos = rest.find('>').map_or(self.src.len(), |i| self.pos + i + 1);
                continue;
            }

            let bytes = self.bytes();
            if bytes[self.pos] == b'<'
                && self.pos + 1 < bytes.len()
                && bytes[self.pos + 1].is_ascii_alphabetic()
            {
                return Some(self.open_tag());
            }

            // Text up to the next '<' (a lone '<' is text too)
            let start = self.pos;
            let scan_from = if bytes[start] == b'<' { start + 1 } else { start };
            let end = self.src[scan_from..]
                .find('<')
                .map_or(self.src.len(), |i| scan_from + i);
            self.pos = end;
            return Some(Token::Text(self.src[start..end].to_string()));
        }
    }

    fn open_tag(&mut self) -> Token {
        let bytes = self.bytes();
        let mut i = self.pos + 1;
        let name_start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':')
        {
            i += 1;
        }
        let mut data = ElementData::new(&self.src[name_start..i]);
        let mut self_closing = false;

        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }
            match bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'>' => {
                    self_closing = true;
                    i += 2;
                    break;
                }
                b'/' => {
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let attr_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && !matches!(bytes[i], b'=' | b'>' | b'/')
            {
                i += 1;
            }
            let name = self.src[attr_start..i].to_ascii_lowercase();

            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            let mut value = String::new();
            if j < bytes.len() && bytes[j] == b'=' {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < bytes.len() && (bytes[j] == b'"' || bytes[j] == b'\'') {
                    let quote = bytes[j];
                    let value_start = j + 1;
                    let value_end = bytes[value_start..]
                        .iter()
                        .position(|&b| b == quote)
                        .map_or(bytes.len(), |p| value_start + p);
                    value = self.src[value_start..value_end].to_string();
                    j = (value_end + 1).min(bytes.len());
                } else {
                    let value_start = j;
                    while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                        j += 1;
                    }
                    value = self.src[value_start..j].to_string();
                }
                i = j;
            }

            if !name.is_empty() && data.attribute(&name).is_none() {
                data.attrs.push((name, value));
            }
        }

        self.pos = i.min(bytes.len());
        Token::Open { data, self_closing }
    }

    /// Consume raw text up to `</tag`, plus the closing tag itself.
    fn raw_text(&mut self, tag: &str) -> String {
        let needle = format!("</{}", tag);
        let lower = self.rest().to_ascii_lowercase();
        match lower.find(&needle) {
            Some(offset) => {
                let text = self.src[self.pos..self.pos + offset].to_string();
                let close_start = self.pos + offset;
                self.pos = self.src[close_start..]
                    .find('>')
                    .map_or(self.src.len(), |i| close_start + i + 1);
                text
            }
            None => {
                let text = self.rest().to_string();
                self.pos = self.src.len();
                text
            }
        }
    }
}

//! Character classes of the MH language.

pub fn is_small(c: char) -> bool {
    c.is_ascii_lowercase()
}

pub fn is_large(c: char) -> bool {
    c.is_ascii_uppercase()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_symbolic(c: char) -> bool {
    match c {
        '!' | '#' | '$' | '%' | '&' | '*' | '+' | '.' | '/' | '<' | '=' | '>' | '?' | '@'
        | '\\' | '^' | '|' | '-' | '~' | ':' => true,
        _ => false,
    }
}

pub fn is_whitespace(c: char) -> bool {
    match c {
        ' ' | '\t' | '\r' | '\n' | '\x0c' => true,
        _ => false,
    }
}

pub fn is_newline(c: char) -> bool {
    c == '\r' || c == '\n'
}

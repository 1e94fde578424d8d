/// Lookahead for iterators that are cheap to clone, such as `str::Chars`.
///
/// Unlike `std::iter::Peekable` this takes `&self`, so a lexer can peek
/// without holding a mutable borrow across a match.
pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    /// One token further than `peek`.
    fn peek_second(&self) -> Option<Self::Item>;

    fn eat<P>(&mut self, pat: P) -> bool
    where
        Self::Item: PartialEq<P>,
    {
        match self.peek() {
            Some(item) if item == pat => {
                self.next();
                true
            }
            _ => false,
        }
    }

    fn eat_while(&mut self, mut pred: impl FnMut(Self::Item) -> bool) {
        while let Some(item) = self.peek() {
            if !pred(item) {
                break;
            }
            self.next();
        }
    }

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

impl<P: Peek> Peek for &mut P {
    fn peek(&self) -> Option<Self::Item> {
        (**self).peek()
    }

    fn peek_second(&self) -> Option<Self::Item> {
        (**self).peek_second()
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }

    fn peek_second(&self) -> Option<Self::Item> {
        let mut chars = self.clone();
        chars.next();
        chars.next()
    }
}

impl<T> Peek for std::slice::Iter<'_, T> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }

    fn peek_second(&self) -> Option<Self::Item> {
        let mut iter = self.clone();
        iter.next();
        iter.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eat_while_stops_at_first_failure() {
        let mut chars = "aab".chars();
        chars.eat_while(|ch| ch == 'a');
        assert_eq!(chars.peek(), Some('b'));
        chars.eat_while(|ch| ch == 'b');
        assert!(chars.at_end());
    }

    #[test]
    fn peeking_does_not_advance() {
        let chars = "xy".chars();
        assert_eq!(chars.peek(), Some('x'));
        assert_eq!(chars.peek_second(), Some('y'));
        assert_eq!(chars.peek(), Some('x'));
    }
}

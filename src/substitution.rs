use crate::expression::safe_to_replace;

/// A sequence of characters that can never be part of a well-formed expression: it starts and
/// ends with an operator, contains `==` and the characters `#`, `@`, `{` and `}` that are not
/// valid tokens. It is therefore safe to use as a temporary marker inside an expression.
pub const SENTINEL: &str = "+#@=={}==@#+";

/// The `index`-th placeholder, a numbered variant of [`SENTINEL`]
pub fn placeholder(index: usize) -> String {
    SENTINEL.replace("{}", &index.to_string())
}

// Joins the pieces of an expression split around every occurrence of `pattern`, putting
// `replacement` into the slot with index `slot` and `pattern` back into all others.
fn refill(pieces: &[&str], pattern: &str, slot: usize, replacement: &str) -> String {
    let mut result = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            result.push_str(if i - 1 == slot { replacement } else { pattern });
        }
        result.push_str(piece);
    }
    result
}

/// Verifies that `new` is obtained from `old` by replacing exactly one occurrence of the left
/// hand side of `modification` (an equality `lhs=rhs`) by its right hand side, and that this
/// replacement respects the order of operations around it.
///
/// The occurrence is the first one (from the left) whose replacement reproduces `new`. Only this
/// occurrence is checked against the order of operations, later ones are never tried.
///
/// # Example
/// ```
/// use equalis::substitution::only_one_modification;
///
/// assert!(only_one_modification("a*c+c*b", "a*c+b*c", "c*b=b*c"));
/// assert!(!only_one_modification("a+b*c", "a+b*c", "d=d"));
/// assert!(!only_one_modification("a+b^2", "a+b*b^2", "b=b*b"));
/// ```
pub fn only_one_modification(old: &str, new: &str, modification: &str) -> bool {
    let mut sides = modification.split('=');
    let (lhs, rhs) = match (sides.next(), sides.next(), sides.next()) {
        (Some(lhs), Some(rhs), None) => (lhs, rhs),
        _ => return false,
    };

    let pieces: Vec<&str> = old.split(lhs).collect();
    for slot in 0..pieces.len() - 1 {
        if refill(&pieces, lhs, slot, rhs) == new {
            let marked = refill(&pieces, lhs, slot, SENTINEL);
            return match marked.split_once(SENTINEL) {
                Some((left, right)) => safe_to_replace(left, rhs, right),
                None => false,
            };
        }
    }
    false
}

/// Replaces every key of `bindings` by its value, all at once. A value is never itself replaced,
/// so `[("a", "b"), ("b", "a")]` swaps `a` and `b`.
///
/// # Example
/// ```
/// use equalis::substitution::substitute_all;
///
/// let bindings = vec![("a".to_owned(), "b".to_owned()), ("b".to_owned(), "a".to_owned())];
/// assert_eq!(substitute_all("a+b*a", &bindings), "b+a*b");
/// ```
pub fn substitute_all<K: AsRef<str>, V: AsRef<str>>(expression: &str, bindings: &[(K, V)]) -> String {
    let mut result = expression.to_owned();
    for (index, (key, _)) in bindings.iter().enumerate() {
        result = result.replace(key.as_ref(), &placeholder(index));
    }
    for (index, (_, value)) in bindings.iter().enumerate() {
        result = result.replace(&placeholder(index), value.as_ref());
    }
    result
}

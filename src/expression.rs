use crate::types::*;

/// Priority of every binary operator, lowest first. `=` is an operator for the validator but has
/// no priority.
pub const OPERATION_ORDER: [(char, Order); 3] = [('+', 0), ('*', 1), ('^', 2)];

/// How much one level of parenthesis adds to the order of operations
pub const PARENTHESIS_ORDER: Order = 3;

/// The class of a single character of an expression
///
/// `Empty` stands for the boundary before the first and after the last character. It is only used
/// as a state of the validator and never produced by [`TokenClass::classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Empty,
    Digit,
    Letter,
    Operator,
    Open,
    Close,
}

// ADJACENCY[last][next]
const ADJACENCY: [[bool; 6]; 6] = [
    // Empty  Digit  Letter Operator Open   Close
    [true, true, true, false, true, false],
    [true, true, false, true, false, true],
    [true, false, false, true, false, true],
    [false, true, true, false, true, false],
    [false, true, true, false, true, false],
    [true, false, false, true, false, true],
];

impl TokenClass {
    /// Classifies a character, returns `None` if it can never appear in an expression
    ///
    /// # Example
    /// ```
    /// use equalis::expression::TokenClass;
    ///
    /// assert_eq!(TokenClass::classify('7'), Some(TokenClass::Digit));
    /// assert_eq!(TokenClass::classify('x'), Some(TokenClass::Letter));
    /// assert_eq!(TokenClass::classify('='), Some(TokenClass::Operator));
    /// assert_eq!(TokenClass::classify('-'), None);
    /// ```
    pub fn classify(character: char) -> Option<Self> {
        match character {
            c if c.is_ascii_digit() => Some(TokenClass::Digit),
            c if is_letter(c) => Some(TokenClass::Letter),
            c if is_operator(c) => Some(TokenClass::Operator),
            '(' => Some(TokenClass::Open),
            ')' => Some(TokenClass::Close),
            _ => None,
        }
    }

    /// Whether a token of class `next` may directly follow a token of this class
    pub fn may_precede(self, next: TokenClass) -> bool {
        ADJACENCY[self as usize][next as usize]
    }
}

pub fn is_letter(character: char) -> bool {
    character.is_ascii_alphabetic()
}

/// Tests whether the given character is an operator, that is one of `+`, `*`, `^` or `=`
pub fn is_operator(character: char) -> bool {
    operator_priority(character).is_some() || character == '='
}

/// Returns the priority of a binary operator (`+` < `*` < `^`)
pub fn operator_priority(character: char) -> Option<Order> {
    OPERATION_ORDER
        .iter()
        .find(|(operator, _)| *operator == character)
        .map(|(_, order)| *order)
}

pub fn remove_spaces(text: &str) -> String {
    text.chars().filter(|c| *c != ' ').collect()
}

/// Returns the letters of an expression in the order of their first appearance
pub fn extract_unknowns(expression: &str) -> Vec<Identifier> {
    let mut unknowns = Vec::new();
    for character in expression.chars().filter(|c| is_letter(*c)) {
        if !unknowns.contains(&character) {
            unknowns.push(character);
        }
    }
    unknowns
}

/// Checks whether an expression makes sense, by looking at every pair of consecutive characters
/// and at the balance of parenthesis. Spaces are ignored.
///
/// This knows nothing about the priority of operators. It should be used on both sides of an
/// equality separately, since `(a + b = c) * d` is well-formed.
///
/// # Example
/// ```
/// use equalis::expression::is_well_formed;
///
/// assert!(is_well_formed("(a + b)*c^2"));
/// assert!(!is_well_formed("a + *b"));
/// assert!(!is_well_formed("(a + b"));
/// assert!(!is_well_formed("2a"));
/// ```
pub fn is_well_formed(expression: &str) -> bool {
    let opening = expression.chars().filter(|c| *c == '(').count();
    let closing = expression.chars().filter(|c| *c == ')').count();
    if opening != closing {
        return false;
    }

    let mut last = TokenClass::Empty;
    for character in expression.chars().filter(|c| *c != ' ') {
        let class = match TokenClass::classify(character) {
            Some(class) => class,
            None => return false,
        };
        if !last.may_precede(class) {
            return false;
        }
        last = class;
    }
    last.may_precede(TokenClass::Empty)
}

/// Computes the order of operation of the first operator met when reading the expression from
/// the left (or from the right). Every unmatched parenthesis crossed on the way adds
/// [`PARENTHESIS_ORDER`]. Without any operator this is the parenthesis order alone.
///
/// # Example
/// ```
/// use equalis::expression::operator_order;
///
/// assert_eq!(operator_order("a+b*c", true), 0);
/// assert_eq!(operator_order("a+b*c", false), 1);
/// assert_eq!(operator_order("(a+b)*c", true), 3);
/// assert_eq!(operator_order("(a+b)*c", false), 1);
/// ```
pub fn operator_order(expression: &str, left_to_right: bool) -> Order {
    let (augmenting, diminishing) = if left_to_right {
        ('(', ')')
    } else {
        (')', '(')
    };
    let characters: Box<dyn Iterator<Item = char>> = if left_to_right {
        Box::new(expression.chars())
    } else {
        Box::new(expression.chars().rev())
    };

    let mut order = 0;
    for character in characters {
        if character == augmenting {
            order += PARENTHESIS_ORDER;
        } else if character == diminishing {
            order -= PARENTHESIS_ORDER;
        } else if let Some(priority) = operator_priority(character) {
            order += priority;
            break;
        }
    }
    order
}

/// Whether the first character opens a parenthesis that is closed by the last one
pub fn is_fully_parenthesized(expression: &str) -> bool {
    if !(expression.starts_with('(') && expression.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    for (i, character) in expression.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != expression.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Checks that `center` can be replaced by something else without changing how the operators
/// around it apply. `left` and `right` are the text directly before and after it. For example
/// in `a + b*c^d`, `b*c` cannot be swapped out because of the `^d` to its right.
///
/// # Example
/// ```
/// use equalis::expression::safe_to_replace;
///
/// assert!(!safe_to_replace("a +", "b*c", "^d"));
/// assert!(safe_to_replace("a +", "b*c", ""));
/// assert!(safe_to_replace("a*(", "b+c", ")"));
/// ```
pub fn safe_to_replace(left: &str, center: &str, right: &str) -> bool {
    if center.chars().count() == 1
        || is_fully_parenthesized(center)
        || (left.ends_with('(') && right.starts_with(')'))
    {
        return true;
    }

    if let Some(operator) = left.chars().rev().find(|c| *c != ' ') {
        if operator != '(' {
            match operator_priority(operator) {
                Some(priority) if operator_order(center, true) >= priority => {}
                _ => return false,
            }
        }
    }

    if let Some(operator) = right.chars().find(|c| *c != ' ') {
        if operator != ')' {
            match operator_priority(operator) {
                Some(priority) if operator_order(center, false) >= priority => {}
                _ => return false,
            }
        }
    }

    true
}

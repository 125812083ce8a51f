// src/services/chatbot.rs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Help,
    Programming,
    Math,
    Thanks,
    Farewell,
    Unknown,
}

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "greetings", "morning", "evening"];
const HELP_WORDS: &[&str] = &["help", "assist", "support", "can you"];
const PROGRAMMING_WORDS: &[&str] = &[
    "code", "coding", "program", "programming", "rust", "python", "javascript", "compile",
    "compiler", "bug", "debug", "function", "error",
];
const MATH_WORDS: &[&str] = &["math", "calculate", "equation", "sum", "plus", "minus", "times", "divided"];
const THANKS_WORDS: &[&str] = &["thanks", "thank", "thx"];
const FAREWELL_WORDS: &[&str] = &["bye", "goodbye", "farewell"];

fn words(msg: &str) -> Vec<String> {
    msg.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn mentions(words: &[String], lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| {
        if k.contains(' ') {
            lower.contains(k)
        } else {
            words.iter().any(|w| w == k)
        }
    })
}

pub fn detect_intent(msg: &str) -> Intent {
    let lower = msg.to_lowercase();
    let words = words(msg);

    if evaluate_expression(msg).is_some() || mentions(&words, &lower, MATH_WORDS) {
        Intent::Math
    } else if mentions(&words, &lower, PROGRAMMING_WORDS) {
        Intent::Programming
    } else if mentions(&words, &lower, THANKS_WORDS) {
        Intent::Thanks
    } else if mentions(&words, &lower, FAREWELL_WORDS) {
        Intent::Farewell
    } else if mentions(&words, &lower, HELP_WORDS) {
        Intent::Help
    } else if mentions(&words, &lower, GREETING_WORDS) {
        Intent::Greeting
    } else {
        Intent::Unknown
    }
}

/// Evaluate the trailing `a <op> b` of a message, e.g. "what is 6 * 7?".
pub fn evaluate_expression(msg: &str) -> Option<f64> {
    let cleaned = msg.trim().trim_end_matches(['?', '.', '!', '=']);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let [.., lhs, op, rhs] = tokens.as_slice() else {
        return None;
    };
    let lhs: f64 = lhs.parse().ok()?;
    let rhs: f64 = rhs.parse().ok()?;
    match *op {
        "+" => Some(lhs + rhs),
        "-" => Some(lhs - rhs),
        "*" | "x" | "×" => Some(lhs * rhs),
        "/" | "÷" if rhs != 0.0 => Some(lhs / rhs),
        _ => None,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.4}").trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn generate_reply(bot_name: &str, user_msg: &str) -> String {
    use Intent::*;

    match detect_intent(user_msg) {
        Greeting => format!("Hello! I'm {bot_name}. Ask me about programming, math or anything else."),
        Help => "I can help with programming questions, quick calculations and general topics. \
                 What do you need?"
            .to_string(),
        Programming => "Happy to help with code. Share the snippet and the error message you see, \
                        and tell me which language you're using."
            .to_string(),
        Math => match evaluate_expression(user_msg) {
            Some(value) => format!("The answer is {}.", format_number(value)),
            None => "Send me the expression, for example `12 * 7`, and I'll work it out.".to_string(),
        },
        Thanks => "You're welcome! Anything else?".to_string(),
        Farewell => "Goodbye! Come back any time.".to_string(),
        Unknown => format!("I'm not sure I understood: \"{user_msg}\". Could you rephrase?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_does_not_match_inside_words() {
        assert_eq!(detect_intent("this thing"), Intent::Unknown);
        assert_eq!(detect_intent("Hi there"), Intent::Greeting);
    }

    #[test]
    fn arithmetic_is_evaluated() {
        assert_eq!(evaluate_expression("what is 6 * 7?"), Some(42.0));
        assert_eq!(evaluate_expression("10 / 4"), Some(2.5));
        assert_eq!(evaluate_expression("1 / 0"), None);
        assert_eq!(evaluate_expression("hello"), None);
    }

    #[test]
    fn numbers_are_formatted_compactly() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
    }
}

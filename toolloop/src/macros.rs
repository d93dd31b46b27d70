/// Creates a single chat [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use toolloop::{Role, tl_msg};
///
/// let message = tl_msg!(assistant => "It is 8.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.content, "It is 8.");
///
/// let result = tl_msg!(tool "evaluate_arithmetic" => "8");
/// assert_eq!(result.name.as_deref(), Some("evaluate_arithmetic"));
/// ```
#[macro_export]
macro_rules! tl_msg {
    (system => $content:expr $(,)?) => {
        $crate::Message::system($content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::user($content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::assistant($content)
    };
    (tool $name:literal => $content:expr $(,)?) => {
        $crate::Message::tool($name, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, assistant, or tool \"name\"");
    };
}

/// Creates a conversation history from role/content pairs.
///
/// ```rust
/// use toolloop::{Role, tl_messages};
///
/// let history = tl_messages![
///     user => "What is 2^3?",
///     assistant => "8",
/// ];
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history[0].role, Role::User);
/// assert_eq!(history[1].role, Role::Assistant);
/// ```
#[macro_export]
macro_rules! tl_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::tl_msg!($role => $content)),+]
    };
}

/// A structural problem detected while rendering an element.
///
/// Issues never abort rendering. They are logged and, when diagnostics are enabled,
/// recorded against the element they concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Issue {
    /// The attribute list had an odd number of items and the last one was dropped.
    OddAttributes {
        /// The item that had no partner.
        dropped: String,
        /// Where the element was created.
        site: String,
    },
    /// A void element was given children.
    VoidChildren {
        /// The void tag.
        tag: String,
        /// How many children were passed.
        count: usize,
        /// Whether their output was removed. It is kept when it cannot be told apart
        /// from output that does not belong to the children.
        discarded: bool,
    },
    /// A text run was given children.
    TextChildren {
        /// How many children were passed.
        count: usize,
    },
    /// A non-void child element was passed without being rendered, so its closing tag
    /// was never written.
    UnrenderedChild {
        /// The tag of the child.
        tag: String,
    },
}
impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::OddAttributes { dropped, site } => {
                write!(f, "odd number of attribute items, dropped {dropped:?} ({site})")
            }
            Issue::VoidChildren {
                tag,
                count,
                discarded: true,
            } => write!(f, "void tag <{tag}> cannot have children, discarded {count}"),
            Issue::VoidChildren {
                tag,
                count,
                discarded: false,
            } => write!(f, "void tag <{tag}> cannot have children, kept {count}"),
            Issue::TextChildren { count } => {
                write!(f, "text run cannot have children, got {count}")
            }
            Issue::UnrenderedChild { tag } => {
                write!(f, "child <{tag}> was passed without being rendered")
            }
        }
    }
}

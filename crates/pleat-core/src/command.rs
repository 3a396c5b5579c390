/// A notification returned from [`Component::update`](crate::Component::update).
///
/// Widgets never call back into their parent directly. Instead, `update`
/// returns a `Command` describing the messages the parent should receive
/// once the current event has fully resolved: a toggle first mutates (or
/// declines to mutate) state, then its notification is delivered.
///
/// Commands are synchronous. There is no background work in a pleat widget,
/// so every message a command carries is available immediately to whoever
/// drives the component: a parent `update`, an event loop, or the
/// [`TestHarness`](crate::testing::TestHarness).
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to report:
/// let cmd = Command::none();
///
/// // Tell the parent the open set changed:
/// let cmd = Command::message(Message::Changed(state));
///
/// // Lift a child command into the parent's message type:
/// let cmd = child.update(msg).map(AppMsg::Accordion);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    Batch(Vec<Command<Msg>>),
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Deliver a message to the parent.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Deliver several commands, in order.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.remove(0),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(self, f: impl Fn(Msg) -> NewMsg) -> Command<NewMsg> {
        self.map_with(&f)
    }

    fn map_with<NewMsg: Send + 'static>(self, f: &dyn Fn(Msg) -> NewMsg) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Message(msg) => Command::message(f(msg)),
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(cmds.into_iter().map(|cmd| cmd.map_with(f)).collect()),
            },
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is a single message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// Flatten the command into the messages it carries, in delivery order.
    pub fn into_messages(self) -> Vec<Msg> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<Msg>) {
        match self.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => out.push(msg),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_into(out);
                }
            }
        }
    }
}

impl<Msg: Send + 'static> Default for Command<Msg> {
    fn default() -> Self {
        Command::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
        assert!(cmd.into_messages().is_empty());
    }

    #[test]
    fn command_message_round_trips_payload() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn command_batch_empty_returns_none() {
        let cmd: Command<()> = Command::batch(vec![]);
        assert!(cmd.is_none());
    }

    #[test]
    fn command_batch_drops_noops_and_unwraps_single() {
        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::message(1)]);
        assert_eq!(cmd.into_message(), Some(1));
    }

    #[test]
    fn command_batch_preserves_order() {
        let cmd: Command<i32> = Command::batch(vec![
            Command::message(1),
            Command::batch(vec![Command::message(2), Command::message(3)]),
        ]);
        assert_eq!(cmd.into_messages(), vec![1, 2, 3]);
    }

    #[test]
    fn command_map_none() {
        let cmd: Command<i32> = Command::none();
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert!(mapped.is_none());
    }

    #[test]
    fn command_map_batch() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_messages(), vec!["1".to_string(), "2".to_string()]);
    }
}

use crossterm::event::{KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

#[derive(Debug)]
enum Step {
    Send(Event),
    Skip,
    Stop,
}

/// Map one item from the crossterm stream to what the reader loop does with it.
fn translate(item: Option<std::io::Result<crossterm::event::Event>>) -> Step {
    match item {
        // Filter for Press only (Windows compatibility)
        Some(Ok(crossterm::event::Event::Key(key))) if key.kind == KeyEventKind::Press => {
            Step::Send(Event::Key(key))
        }
        Some(Ok(crossterm::event::Event::Resize(_, _))) => Step::Send(Event::Resize),
        Some(Ok(_)) => Step::Skip,
        // Read errors end input the same as a closed stream
        Some(Err(_)) | None => Step::Stop,
    }
}

/// Merges terminal input and a periodic tick into one channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval =
                tokio::time::interval(std::time::Duration::from_millis(tick_rate_ms));

            loop {
                let event = tokio::select! {
                    maybe_event = reader.next() => match translate(maybe_event) {
                        Step::Send(event) => event,
                        Step::Skip => continue,
                        Step::Stop => break,
                    },
                    _ = tick_interval.tick() => Event::Tick,
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        EventHandler { rx }
    }

    /// Next event, `None` once terminal input has ended.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> crossterm::event::Event {
        crossterm::event::Event::Key(KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_press_and_resize_are_sent() {
        assert!(matches!(
            translate(Some(Ok(key(KeyEventKind::Press)))),
            Step::Send(Event::Key(_))
        ));
        assert!(matches!(
            translate(Some(Ok(crossterm::event::Event::Resize(80, 24)))),
            Step::Send(Event::Resize)
        ));
    }

    #[test]
    fn test_release_and_focus_are_skipped() {
        assert!(matches!(translate(Some(Ok(key(KeyEventKind::Release)))), Step::Skip));
        assert!(matches!(
            translate(Some(Ok(crossterm::event::Event::FocusLost))),
            Step::Skip
        ));
    }

    #[test]
    fn test_read_error_stops_reader() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "tty gone");
        assert!(matches!(translate(Some(Err(err))), Step::Stop));
        assert!(matches!(translate(None), Step::Stop));
    }
}

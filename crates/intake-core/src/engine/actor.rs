//! Actor wrapper around [`FormEngine`] for concurrent front ends.
//!
//! The engine lives on a single task and is driven by commands sent through
//! a cloneable [`FormHandle`]. A submission's transport call runs on its own
//! task; its completion is fed back into the actor loop, so edits keep being
//! served while a submission is pending and a second submit is ignored.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use intake_types::error::SubmissionError;
use intake_types::value::{FieldValue, Payload};

use crate::event::{EventBus, FormEvent};
use crate::submit::SubmissionClient;

use super::form::{EditError, FormEngine, SubmissionTicket, SubmitError};
use super::state::FieldState;
use super::validate::ValidationReport;

/// Buffer size for the command mailbox.
const COMMAND_BUFFER: usize = 64;

/// Errors returned through a [`FormHandle`].
#[derive(Debug, Error)]
pub enum HandleError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The actor task has stopped.
    #[error("form actor is no longer running")]
    Closed,
}

/// Point-in-time copy of the engine's state.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub states: Vec<FieldState>,
    pub submitting: bool,
    pub payload: Payload,
    pub report: ValidationReport,
}

impl FormSnapshot {
    pub fn state(&self, field_id: &str) -> Option<&FieldState> {
        self.states.iter().find(|s| s.field_id == field_id)
    }
}

type Reply<T> = oneshot::Sender<T>;

enum Command {
    SetValue {
        field_id: String,
        value: FieldValue,
        reply: Reply<Result<(), EditError>>,
    },
    Toggle {
        field_id: String,
        option: String,
        checked: bool,
        reply: Reply<Result<(), EditError>>,
    },
    Reset {
        reply: Reply<()>,
    },
    Snapshot {
        reply: Reply<FormSnapshot>,
    },
    Submit {
        reply: Reply<Result<(), SubmitError>>,
    },
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::SetValue { .. } => "SetValue",
            Command::Toggle { .. } => "Toggle",
            Command::Reset { .. } => "Reset",
            Command::Snapshot { .. } => "Snapshot",
            Command::Submit { .. } => "Submit",
        };
        f.write_str(name)
    }
}

struct Completion {
    ticket: SubmissionTicket,
    outcome: Result<(), SubmissionError>,
    reply: Reply<Result<(), SubmitError>>,
}

/// Owns a [`FormEngine`] and the client its submissions go through.
pub struct FormActor<C> {
    engine: FormEngine,
    client: Arc<C>,
    commands: mpsc::Receiver<Command>,
    completions_tx: mpsc::Sender<Completion>,
    completions: mpsc::Receiver<Completion>,
}

impl<C: SubmissionClient + 'static> FormActor<C> {
    /// Start the actor on the current tokio runtime and return a handle.
    ///
    /// The actor stops once every handle is dropped and no submission is
    /// pending.
    pub fn spawn(engine: FormEngine, client: Arc<C>) -> FormHandle {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (completions_tx, completions) = mpsc::channel(1);
        let events = engine.events().clone();

        let actor = Self {
            engine,
            client,
            commands,
            completions_tx,
            completions,
        };
        tokio::spawn(actor.run());

        FormHandle {
            commands: tx,
            events,
        }
    }

    async fn run(mut self) {
        let mut accepting = true;
        loop {
            tokio::select! {
                cmd = self.commands.recv(), if accepting => match cmd {
                    Some(cmd) => self.handle(cmd),
                    None => {
                        accepting = false;
                        if !self.engine.is_submitting() {
                            break;
                        }
                    }
                },
                Some(done) = self.completions.recv() => {
                    let result = self.engine.finish_submit(done.ticket, done.outcome);
                    let _ = done.reply.send(result);
                    if !accepting {
                        break;
                    }
                }
            }
        }
        debug!("form actor stopped");
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::SetValue {
                field_id,
                value,
                reply,
            } => {
                let _ = reply.send(self.engine.set_value(&field_id, value));
            }
            Command::Toggle {
                field_id,
                option,
                checked,
                reply,
            } => {
                let _ = reply.send(self.engine.toggle(&field_id, &option, checked));
            }
            Command::Reset { reply } => {
                self.engine.reset();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(FormSnapshot {
                    states: self.engine.states().to_vec(),
                    submitting: self.engine.is_submitting(),
                    payload: self.engine.payload(),
                    report: self.engine.validate(),
                });
            }
            Command::Submit { reply } => match self.engine.begin_submit() {
                Ok(ticket) => self.dispatch(ticket, reply),
                Err(err) => {
                    let _ = reply.send(Err(err));
                }
            },
        }
    }

    fn dispatch(&self, ticket: SubmissionTicket, reply: Reply<Result<(), SubmitError>>) {
        let client = self.client.clone();
        let completions = self.completions_tx.clone();
        debug!(client = client.name(), "dispatching submission");

        tokio::spawn(async move {
            let outcome = client.submit(&ticket.payload).await;
            let done = Completion {
                ticket,
                outcome,
                reply,
            };
            if completions.send(done).await.is_err() {
                warn!("form actor gone before submission completed");
            }
        });
    }
}

/// Cloneable handle to a running [`FormActor`].
#[derive(Debug, Clone)]
pub struct FormHandle {
    commands: mpsc::Sender<Command>,
    events: EventBus,
}

impl FormHandle {
    /// Subscribe to the form's events.
    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub async fn set_value(
        &self,
        field_id: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), HandleError> {
        let field_id = field_id.into();
        let value = value.into();
        self.request(|reply| Command::SetValue {
            field_id,
            value,
            reply,
        })
        .await??;
        Ok(())
    }

    pub async fn toggle(
        &self,
        field_id: impl Into<String>,
        option: impl Into<String>,
        checked: bool,
    ) -> Result<(), HandleError> {
        let field_id = field_id.into();
        let option = option.into();
        self.request(|reply| Command::Toggle {
            field_id,
            option,
            checked,
            reply,
        })
        .await??;
        Ok(())
    }

    pub async fn reset(&self) -> Result<(), HandleError> {
        self.request(|reply| Command::Reset { reply }).await
    }

    pub async fn snapshot(&self) -> Result<FormSnapshot, HandleError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Submit the form and wait for the outcome.
    ///
    /// Returns `SubmitError::InFlight` immediately if another submission is
    /// pending.
    pub async fn submit(&self) -> Result<(), HandleError> {
        self.request(|reply| Command::Submit { reply }).await??;
        Ok(())
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, HandleError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .await
            .map_err(|_| HandleError::Closed)?;
        rx.await.map_err(|_| HandleError::Closed)
    }
}

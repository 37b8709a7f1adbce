use super::ports::DocumentInfo;
use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};

/// Notifications published by the document manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    CurrentDocumentChanged(Option<DocumentInfo>),
    DirtyFlagChanged(DocumentInfo),
}

#[derive(Clone)]
pub struct DocumentBusSender {
    tx: Sender<DocumentEvent>,
}

pub struct DocumentBusReceiver {
    rx: Receiver<DocumentEvent>,
}

pub fn document_bus() -> (DocumentBusSender, DocumentBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (DocumentBusSender { tx }, DocumentBusReceiver { rx })
}

impl DocumentBusSender {
    pub fn send(&self, event: DocumentEvent) -> Result<(), SendError<DocumentEvent>> {
        self.tx.send(event)
    }

    pub fn current_document_changed(&self, doc: Option<DocumentInfo>) {
        if self.send(DocumentEvent::CurrentDocumentChanged(doc)).is_err() {
            tracing::trace!("document bus closed; current-document change dropped");
        }
    }

    pub fn dirty_flag_changed(&self, doc: DocumentInfo) {
        if self.send(DocumentEvent::DirtyFlagChanged(doc)).is_err() {
            tracing::trace!("document bus closed; dirty change dropped");
        }
    }
}

impl DocumentBusReceiver {
    pub fn try_recv(&mut self) -> Result<DocumentEvent, TryRecvError> {
        self.rx.try_recv()
    }
}

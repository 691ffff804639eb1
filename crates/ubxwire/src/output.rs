use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use ubxwire_frame::Message;
use ubxwire_session::class::{class_name, message_name};
use ubxwire_session::{ErrorCode, Event, EventListener};

use crate::cmd::hex::format_bytes;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One received frame, or one frame that failed to decode.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    pub class: u8,
    pub id: u8,
    pub name: String,
    pub length: u16,
    pub payload: String,
    pub event: Option<Event>,
    pub error: Option<ErrorCode>,
    pub timestamp: String,
}

impl MessageRecord {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            class: msg.class,
            id: msg.id,
            name: display_name(msg.class, msg.id),
            length: msg.length,
            payload: format_bytes(&msg.payload),
            event: None,
            error: None,
            timestamp: now_unix_seconds(),
        }
    }

    /// A frame that was dropped before dispatch.
    pub fn rejected(error: ErrorCode) -> Self {
        Self {
            class: 0,
            id: 0,
            name: "-".to_string(),
            length: 0,
            payload: String::new(),
            event: None,
            error: Some(error),
            timestamp: now_unix_seconds(),
        }
    }
}

/// Listener that turns session callbacks into [`MessageRecord`]s.
#[derive(Clone, Default)]
pub struct RecordCollector {
    records: Arc<Mutex<Vec<MessageRecord>>>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach an error to the most recent record.
    pub fn mark_last(&self, error: ErrorCode) {
        if let Ok(mut records) = self.records.lock() {
            if let Some(last) = records.last_mut() {
                last.error = Some(error);
            }
        }
    }

    pub fn push(&self, record: MessageRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    /// Take everything collected so far.
    pub fn drain(&self) -> Vec<MessageRecord> {
        self.records
            .lock()
            .map(|mut r| std::mem::take(&mut *r))
            .unwrap_or_default()
    }
}

impl EventListener for RecordCollector {
    fn on_event(&mut self, event: Event, _message: &Message) {
        if let Ok(mut records) = self.records.lock() {
            if let Some(last) = records.last_mut() {
                last.event = Some(event);
            }
        }
    }

    fn on_message(&mut self, message: &Message) {
        self.push(MessageRecord::from_message(message));
    }
}

pub fn display_name(class: u8, id: u8) -> String {
    message_name(class, id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-0x{id:02X}", class_name(class)))
}

pub fn print_records(records: &[MessageRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for record in records {
                print_json(record);
            }
        }
        OutputFormat::Table => {
            if records.is_empty() {
                return;
            }
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MESSAGE", "CLASS", "ID", "LEN", "EVENT", "ERROR", "PAYLOAD"]);
            for record in records {
                table.add_row(vec![
                    record.name.clone(),
                    format!("{:02X}", record.class),
                    format!("{:02X}", record.id),
                    record.length.to_string(),
                    record.event.map(|e| e.to_string()).unwrap_or_default(),
                    record.error.map(|e| format!("{e:?}")).unwrap_or_default(),
                    record.payload.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for record in records {
                println!("{}", pretty_line(record));
            }
        }
    }
}

fn pretty_line(record: &MessageRecord) -> String {
    if record.name == "-" {
        return format!("dropped frame error={:?}", record.error.unwrap_or_default());
    }
    let mut line = format!(
        "{} class={:02X} id={:02X} len={}",
        record.name, record.class, record.id, record.length
    );
    if let Some(event) = record.event {
        line.push_str(&format!(" event={event}"));
    }
    if let Some(error) = record.error {
        line.push_str(&format!(" error={error:?}"));
    }
    if !record.payload.is_empty() {
        line.push_str(&format!(" payload=[{}]", record.payload));
    }
    line
}

/// Print key/value pairs as a two-column table or `key: value` lines.
pub fn print_fields(fields: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (key, value) in fields {
                table.add_row(vec![key.to_string(), value.clone()]);
            }
            println!("{table}");
        }
        _ => {
            for (key, value) in fields {
                println!("{key}: {value}");
            }
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

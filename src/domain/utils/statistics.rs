use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::error::Result;

/// `tracing` target of all structured dispatch analytics.
pub const ANALYTICS_TARGET: &str = "elevator_dispatch::analytics";

/// Each event consists of a set of key-value-pairs with the measured data or some meta data of the event.
/// This enum specifies all allowed key values and thus the column in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatParameter {
    /// Time in ms since the collector was started.
    Time,

    /// What happened, see [`DispatchEvent`].
    Event,

    ElevatorId,

    /// Floor of the call or of the arrival.
    Floor,

    /// Requested direction of a hall call.
    Direction,

    /// Name of the active scheduling strategy.
    Strategy,

    /// Time between creation of a request and the arrival that served it.
    WaitTimeMs,

    /// Stops left in the elevator's queue after the event.
    PendingStops,
}

impl StatParameter {
    /// Column order of the CSV output.
    pub const ALL: [StatParameter; 8] = [
        StatParameter::Time,
        StatParameter::Event,
        StatParameter::ElevatorId,
        StatParameter::Floor,
        StatParameter::Direction,
        StatParameter::Strategy,
        StatParameter::WaitTimeMs,
        StatParameter::PendingStops,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            StatParameter::Time => "Time",
            StatParameter::Event => "Event",
            StatParameter::ElevatorId => "ElevatorId",
            StatParameter::Floor => "Floor",
            StatParameter::Direction => "Direction",
            StatParameter::Strategy => "Strategy",
            StatParameter::WaitTimeMs => "WaitTimeMs",
            StatParameter::PendingStops => "PendingStops",
        }
    }

    pub fn headers() -> Vec<&'static str> {
        Self::ALL.iter().map(StatParameter::header).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchEvent {
    HallCallAssigned,
    HallCallDropped,
    CabinCallAccepted,
    CabinCallIgnored,
    CabinCallDropped,
    Arrival,
    StrategyChanged,
    MaintenanceEntered,
    MaintenanceLeft,
}

impl DispatchEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchEvent::HallCallAssigned => "HallCallAssigned",
            DispatchEvent::HallCallDropped => "HallCallDropped",
            DispatchEvent::CabinCallAccepted => "CabinCallAccepted",
            DispatchEvent::CabinCallIgnored => "CabinCallIgnored",
            DispatchEvent::CabinCallDropped => "CabinCallDropped",
            DispatchEvent::Arrival => "Arrival",
            DispatchEvent::StrategyChanged => "StrategyChanged",
            DispatchEvent::MaintenanceEntered => "MaintenanceEntered",
            DispatchEvent::MaintenanceLeft => "MaintenanceLeft",
        }
    }
}

/// store values in their native format, only format them when writing to the CSV.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl From<i32> for StatValue {
    fn from(v: i32) -> Self {
        StatValue::Integer(v as i64)
    }
}

impl From<u32> for StatValue {
    fn from(v: u32) -> Self {
        StatValue::Integer(v as i64)
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        StatValue::Integer(v as i64)
    }
}

impl From<u128> for StatValue {
    fn from(v: u128) -> Self {
        StatValue::Integer(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl From<String> for StatValue {
    fn from(v: String) -> Self {
        StatValue::Text(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        StatValue::Text(v.to_string())
    }
}

impl From<bool> for StatValue {
    fn from(v: bool) -> Self {
        StatValue::Bool(v)
    }
}

impl StatValue {
    fn to_cell(&self) -> String {
        match self {
            StatValue::Text(t) => t.clone(),
            StatValue::Integer(i) => i.to_string(),
            StatValue::Float(f) => f.to_string(),
            StatValue::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatisticEvent {
    data: HashMap<StatParameter, StatValue>,
}

impl StatisticEvent {
    pub fn new(event: DispatchEvent) -> Self {
        let mut statistic_event = Self { data: HashMap::new() };
        statistic_event.set(StatParameter::Event, event.as_str());
        statistic_event
    }

    pub fn set<V: Into<StatValue>>(&mut self, param: StatParameter, value: V) -> &mut Self {
        self.data.insert(param, value.into());
        self
    }

    pub fn get(&self, param: StatParameter) -> Option<&StatValue> {
        self.data.get(&param)
    }

    /// One CSV row in column order, `NA` for every parameter the event does not carry.
    fn to_row(&self) -> Vec<String> {
        StatParameter::ALL.iter().map(|param| self.data.get(param).map_or_else(|| "NA".to_string(), StatValue::to_cell)).collect()
    }
}

/// Messages sent from the dispatcher and the elevator workers to the writer thread.
enum StatsMessage {
    Log(StatisticEvent),
    Flush,
    Shutdown,
}

/// Handle that allows the controller and the workers to record dispatch events.
///
/// Rows are written by a background thread, so recording never blocks elevator movement.
/// Share it through an `Arc`; `close` flushes and waits for the writer.
#[derive(Debug)]
pub struct StatsCollector {
    sender: mpsc::Sender<StatsMessage>,
    start_time: Instant,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl StatsCollector {
    /// Writes to `path`, or to stdout when no path is given.
    pub fn init(path: Option<&Path>) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match path {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        Ok(Self::from_writer(writer))
    }

    /// Spawns the background thread that owns `writer`.
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || Self::worker_loop(rx, writer));

        StatsCollector { sender: tx, start_time: Instant::now(), writer: Mutex::new(Some(handle)) }
    }

    fn worker_loop(rx: mpsc::Receiver<StatsMessage>, writer: Box<dyn Write + Send>) {
        let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

        if let Err(e) = csv_wtr.write_record(StatParameter::headers()) {
            log::error!("Stats Error: Failed to write headers: {}", e);
        }

        for msg in rx {
            match msg {
                StatsMessage::Log(event) => {
                    if let Err(e) = csv_wtr.write_record(event.to_row()) {
                        log::error!("Stats Error: Failed to write record: {}", e);
                    }
                }
                StatsMessage::Flush => {
                    let _ = csv_wtr.flush();
                }
                StatsMessage::Shutdown => break,
            }
        }
        let _ = csv_wtr.flush();
    }

    /// Non-blocking; stamps the event with the time since start unless it already has one.
    pub fn add_event(&self, mut event: StatisticEvent) {
        if event.get(StatParameter::Time).is_none() {
            event.set(StatParameter::Time, self.start_time.elapsed().as_millis());
        }

        // A stopped writer must not take the dispatcher down with it.
        let _ = self.sender.send(StatsMessage::Log(event));
    }

    pub fn flush(&self) {
        let _ = self.sender.send(StatsMessage::Flush);
    }

    /// Flushes all recorded rows and waits for the writer thread. Later events are discarded.
    pub fn close(&self) {
        let _ = self.sender.send(StatsMessage::Shutdown);
        let handle = self.writer.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                log::error!("Stats Error: writer thread panicked");
            }
        }
    }
}

impl Drop for StatsCollector {
    fn drop(&mut self) {
        self.close();
    }
}

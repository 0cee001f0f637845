use crate::error::Result;
use std::cell::RefCell;
use std::rc::Rc;

pub mod jsonl;

pub use jsonl::{JsonlMetricSink, MetricRecord};

/// Príjemca metrík z evaluácie (experiment tracking).
///
/// Sink nesmie meniť vypočítané výsledky, len ich niekam zapisuje.
pub trait MetricSink {
    fn get_name(&self) -> &str;

    fn log_metric(&mut self, name: &str, value: f64) -> Result<()>;
}

/// Predvolený sink, ktorý metriky zahodí
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricSink;

impl MetricSink for NoopMetricSink {
    fn get_name(&self) -> &str {
        "noop"
    }

    fn log_metric(&mut self, _name: &str, _value: f64) -> Result<()> {
        Ok(())
    }
}

/// Sink, ktorý si metriky pamätá v poradí volaní.
///
/// Klony zdieľajú ten istý záznam, takže po odovzdaní jedného klonu
/// do pipeline sa dá druhým čítať, čo bolo zalogované.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMetricSink {
    records: Rc<RefCell<Vec<(String, f64)>>>,
}

impl InMemoryMetricSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(String, f64)> {
        self.records.borrow().clone()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.records
            .borrow()
            .iter()
            .rev()
            .find(|(metric, _)| metric == name)
            .map(|(_, value)| *value)
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl MetricSink for InMemoryMetricSink {
    fn get_name(&self) -> &str {
        "in_memory"
    }

    fn log_metric(&mut self, name: &str, value: f64) -> Result<()> {
        self.records.borrow_mut().push((name.to_string(), value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_clones_share_records() {
        let observer = InMemoryMetricSink::new();
        let mut sink: Box<dyn MetricSink> = Box::new(observer.clone());

        sink.log_metric("mse", 0.5).unwrap();
        sink.log_metric("r2", 0.1).unwrap();

        assert_eq!(
            observer.records(),
            vec![("mse".to_string(), 0.5), ("r2".to_string(), 0.1)]
        );
        assert_eq!(observer.get("r2"), Some(0.1));
        assert_eq!(observer.get("rmse"), None);
    }

    #[test]
    fn noop_accepts_everything() {
        let mut sink = NoopMetricSink;
        assert!(sink.log_metric("mse", f64::NAN).is_ok());
        assert_eq!(sink.get_name(), "noop");
    }
}

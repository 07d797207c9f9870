//! Everything a system needs besides the state it mutates.

use greenfield_logic::config::SimConfig;

use crate::catalog::CountyCatalog;
use crate::events::SimEvent;
use crate::rng::RandomSource;

pub struct TickContext<'a> {
    pub config: &'a SimConfig,
    pub catalog: &'a dyn CountyCatalog,
    pub rng: &'a mut dyn RandomSource,
    /// Events emitted so far, in order.
    pub events: Vec<SimEvent>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        config: &'a SimConfig,
        catalog: &'a dyn CountyCatalog,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            config,
            catalog,
            rng,
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Hand over the collected events, leaving the context empty.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Orçamento de tempo de uma busca.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControl {
    /// Tempo fixo para este lance.
    MoveTime(Duration),
    /// Sem limite; só para com um pedido externo de paragem.
    Infinite,
}

/// Controla o prazo da busca corrente e o pedido cooperativo de paragem.
/// A busca consulta `out_of_time()` com frequência e desenrola sozinha.
pub struct TimeManager {
    deadline: Option<Instant>,
    stopped: Arc<AtomicBool>,
}

/// Handle clonável para parar a busca a partir de outra thread.
#[derive(Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl TimeManager {
    pub fn new() -> Self {
        Self {
            deadline: None,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Arma o relógio para uma nova busca e limpa qualquer paragem pendente.
    pub fn set_timer(&mut self, control: TimeControl) {
        self.stopped.store(false, Ordering::Relaxed);
        self.deadline = match control {
            TimeControl::MoveTime(budget) => Some(Instant::now() + budget),
            TimeControl::Infinite => None,
        };
    }

    /// Prazo esgotado ou paragem pedida.
    #[inline]
    pub fn out_of_time(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stopped))
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new()
    }
}

use crate::core::{Depth, Score};
use chess::ChessMove;

/// Classificação do score guardado, nos moldes do alpha-beta fail-soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Valor exato (PV-node)
    Exact,
    /// Lower bound (Cut-node, fail-high)
    LowerBound,
    /// Upper bound (All-node, fail-low)
    UpperBound,
}

/// Entrada da Transposition Table.
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub fingerprint: u64,
    pub depth: Depth,
    pub score: Score,
    pub node_type: NodeType,
    pub best_move: Option<ChessMove>,
}

/// Resultado de uma consulta à TT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Nada aproveitável (ausente, colisão ou profundidade insuficiente).
    Miss,
    /// A entrada decide o nó sozinha; devolve o score guardado (fail-soft).
    Cutoff(Score),
    /// A entrada não decide, mas estreita a janela (alpha', beta').
    Bounds(Score, Score),
}

/// Transposition Table de tamanho fixo, indexada por módulo do hash.
/// Replacement scheme: always replace.
pub struct TranspositionTable {
    table: Vec<Option<TTEntry>>,
    mask: u64,
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    /// `capacity` é arredondada para cima para uma potência de dois, para que
    /// a indexação seja uma máscara de bits em vez de um módulo.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2).next_power_of_two();
        Self {
            table: vec![None; capacity],
            mask: capacity as u64 - 1,
            hits: 0,
            misses: 0,
        }
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    /// Consulta uma posição.
    ///
    /// Uma entrada só é aproveitada quando foi buscada pelo menos à mesma
    /// profundidade restante. O fingerprint completo é sempre conferido,
    /// porque posições distintas partilham o mesmo slot.
    pub fn probe(&mut self, hash: u64, depth: Depth, alpha: Score, beta: Score) -> Probe {
        let slot = self.table[self.index(hash)];
        let entry = match slot {
            Some(entry) if entry.fingerprint == hash && entry.depth >= depth => entry,
            _ => {
                self.misses += 1;
                return Probe::Miss;
            }
        };
        self.hits += 1;

        match entry.node_type {
            NodeType::Exact => Probe::Cutoff(entry.score),
            NodeType::LowerBound if entry.score >= beta => Probe::Cutoff(entry.score),
            NodeType::UpperBound if entry.score <= alpha => Probe::Cutoff(entry.score),
            NodeType::LowerBound => Probe::Bounds(alpha.max(entry.score), beta),
            NodeType::UpperBound => Probe::Bounds(alpha, beta.min(entry.score)),
        }
    }

    /// Armazena uma posição, substituindo incondicionalmente o ocupante do slot.
    pub fn store(
        &mut self,
        hash: u64,
        depth: Depth,
        score: Score,
        node_type: NodeType,
        best_move: Option<ChessMove>,
    ) {
        let index = self.index(hash);
        self.table[index] = Some(TTEntry {
            fingerprint: hash,
            depth,
            score,
            node_type,
            best_move,
        });
    }

    /// Melhor lance memorizado para a posição, se houver (para move ordering).
    /// Serve mesmo quando a profundidade da entrada é insuficiente para cutoff.
    pub fn best_move(&self, hash: u64) -> Option<ChessMove> {
        match self.table[self.index(hash)] {
            Some(entry) if entry.fingerprint == hash => entry.best_move,
            _ => None,
        }
    }

    /// Limpa a TT para uma nova busca.
    pub fn clear(&mut self) {
        self.table.fill(None);
        self.hits = 0;
        self.misses = 0;
    }

    /// Estatísticas da TT
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn entrada_exata_decide_o_no() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(0xABCD, 5, 37, NodeType::Exact, None);
        assert_eq!(tt.probe(0xABCD, 5, -100, 100), Probe::Cutoff(37));
        assert_eq!(tt.probe(0xABCD, 3, -100, 100), Probe::Cutoff(37));
    }

    #[test]
    fn profundidade_insuficiente_ignora_a_entrada() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(0xABCD, 3, 37, NodeType::Exact, None);
        assert_eq!(tt.probe(0xABCD, 5, -100, 100), Probe::Miss);
    }

    #[test]
    fn bounds_cortam_ou_estreitam() {
        let mut tt = TranspositionTable::new(1024);

        tt.store(1, 4, 80, NodeType::LowerBound, None);
        // score >= beta: corte fail-soft devolve o score guardado
        assert_eq!(tt.probe(1, 4, -100, 50), Probe::Cutoff(80));
        // abaixo de beta: só levanta alpha
        assert_eq!(tt.probe(1, 4, -100, 100), Probe::Bounds(80, 100));

        tt.store(2, 4, -80, NodeType::UpperBound, None);
        assert_eq!(tt.probe(2, 4, -50, 100), Probe::Cutoff(-80));
        assert_eq!(tt.probe(2, 4, -100, 100), Probe::Bounds(-100, -80));
    }

    #[test]
    fn colisao_de_slot_substitui_e_nao_confunde_posicoes() {
        let mut tt = TranspositionTable::new(4);
        let (a, b) = (0x10u64, 0x20u64); // mesmo slot com mask = 3

        tt.store(a, 4, 10, NodeType::Exact, None);
        tt.store(b, 2, 20, NodeType::Exact, None);

        // b expulsou a, e a consulta por a não devolve o score de b
        assert_eq!(tt.probe(a, 1, -100, 100), Probe::Miss);
        assert_eq!(tt.probe(b, 2, -100, 100), Probe::Cutoff(20));
    }

    #[test]
    fn melhor_lance_disponivel_mesmo_com_pouca_profundidade() {
        let mut tt = TranspositionTable::new(1024);
        let mv = chess::ChessMove::from_str("e2e4").unwrap();
        tt.store(0xFEED, 1, 0, NodeType::UpperBound, Some(mv));

        assert_eq!(tt.probe(0xFEED, 6, -100, 100), Probe::Miss);
        assert_eq!(tt.best_move(0xFEED), Some(mv));
        assert_eq!(tt.best_move(0xBEEF), None);
    }
}

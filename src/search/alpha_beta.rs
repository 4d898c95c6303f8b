use crate::core::board_interface::{classify_move, in_check, legal_moves};
use crate::core::types::{Depth, Score, INF};
use crate::core::zobrist::ZobristKeys;
use crate::core::EngineError;
use crate::search::evaluation::{is_mate_score, Evaluator};
use crate::search::ordering::{order_moves, KillerTable};
use crate::search::quiescence::quiescence_search;
use crate::search::time_manager::{StopHandle, TimeControl, TimeManager};
use crate::search::transposition::{NodeType, Probe, TranspositionTable};
use chess::{Board, ChessMove};
use std::time::{Duration, Instant};

/// Redução do lance nulo, em plies.
const NULL_REDUCTION: Depth = 2;

/// Parâmetros da busca. Os interruptores de poda existem para testes A/B:
/// desligados, a busca degrada para alpha-beta puro com o mesmo resultado.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: Depth,
    pub use_null_move: bool,
    pub use_pvs: bool,
    pub tt_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            use_null_move: true,
            use_pvs: true,
            tt_capacity: 1 << 20,
        }
    }
}

/// Resultado de uma busca completa.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best_move: ChessMove,
    pub score: Score,
    pub depth: Depth,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Motor negamax alpha-beta com TT, killers, lance nulo e PVS,
/// conduzido por aprofundamento iterativo sob um orçamento de tempo.
pub struct SearchEngine {
    keys: ZobristKeys,
    tt: TranspositionTable,
    killers: KillerTable,
    evaluator: Evaluator,
    time: TimeManager,
    config: SearchConfig,
    nodes: u64,
    /// Profundidade da raiz da iteração corrente; identifica o nó raiz.
    start_depth: Depth,
    /// Melhor lance da raiz na iteração corrente.
    root_best: Option<ChessMove>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            keys: ZobristKeys::new(),
            tt: TranspositionTable::new(config.tt_capacity),
            killers: KillerTable::new(),
            evaluator: Evaluator::new(),
            time: TimeManager::new(),
            config,
            nodes: 0,
            start_depth: 0,
            root_best: None,
        }
    }

    /// Handle para interromper a busca a partir de outra thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.time.stop_handle()
    }

    /// Aprofundamento iterativo: busca a profundidades crescentes até esgotar
    /// o limite, encontrar mate ou estourar o orçamento de tempo. Devolve
    /// sempre o lance da última iteração aproveitável.
    pub fn start_search(
        &mut self,
        board: &Board,
        depth_limit: Depth,
        control: TimeControl,
    ) -> Result<SearchReport, EngineError> {
        let root_moves = legal_moves(board);
        if root_moves.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        self.tt.clear();
        self.killers.clear();
        self.nodes = 0;
        self.time.set_timer(control);

        let start = Instant::now();
        let hash = self.keys.hash_from_scratch(board);
        let depth_limit = depth_limit.min(self.config.max_depth).max(1);

        let mut best_move = root_moves[0];
        let mut best_score = -INF;
        let mut best_depth = 0;

        for depth in 1..=depth_limit {
            self.start_depth = depth;
            self.root_best = None;

            let score = self.negamax(board, hash, depth, -INF, INF);
            let cancelled = self.time.out_of_time();

            // Iteração cancelada só conta se a raiz já tinha adotado um lance
            if let Some(mv) = self.root_best {
                best_move = mv;
                best_score = score;
                best_depth = depth;
                self.print_info(depth, score, start.elapsed());
            }

            if cancelled {
                break;
            }
            if is_mate_score(score) {
                break;
            }
        }

        log::debug!(
            "busca terminada: {} nós, tt hit rate {:.1}%",
            self.nodes,
            self.tt.hit_rate() * 100.0
        );

        Ok(SearchReport {
            best_move,
            score: best_score,
            depth: best_depth,
            nodes: self.nodes,
            elapsed: start.elapsed(),
        })
    }

    /// Negamax alpha-beta fail-soft. `depth` é a profundidade restante;
    /// o nó raiz é o único com `depth == start_depth`.
    fn negamax(
        &mut self,
        board: &Board,
        hash: u64,
        depth: Depth,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;
        let entry_alpha = alpha;
        let is_root = depth == self.start_depth;

        match self.tt.probe(hash, depth, alpha, beta) {
            Probe::Cutoff(score) => return score,
            Probe::Bounds(a, b) => {
                alpha = a;
                beta = b;
            }
            Probe::Miss => {}
        }

        if depth == 0 {
            return quiescence_search(
                board,
                alpha,
                beta,
                &self.evaluator,
                &self.time,
                &mut self.nodes,
            );
        }

        // Lance nulo: se passar a vez ainda bate beta, a posição é forte
        // demais para valer a pena buscar a fundo. O board recusa o lance
        // nulo em xeque, o que já cobre a condição de segurança.
        if self.config.use_null_move && depth > NULL_REDUCTION + 1 {
            if let Some(null_board) = board.null_move() {
                debug_assert!(!in_check(board));
                let null_hash = self.keys.hash_after_null(hash, board, &null_board);
                let score = -self.negamax(
                    &null_board,
                    null_hash,
                    depth - 1 - NULL_REDUCTION,
                    -beta,
                    -beta + 1,
                );
                if score >= beta {
                    return score;
                }
            }
        }

        let mut moves = legal_moves(board);
        if moves.is_empty() {
            // Mate ou afogamento; o avaliador devolve a sentinela correta
            return self.evaluator.evaluate(board);
        }

        let hash_move = self.tt.best_move(hash);
        order_moves(board, &mut moves, hash_move, self.killers.get(depth));

        let mut best = -INF;
        let mut best_move = None;

        for (i, &mv) in moves.iter().enumerate() {
            if self.time.out_of_time() {
                // Resultado parcial; não contamina a TT
                return best;
            }

            let kind = classify_move(board, mv);
            let child = board.make_move_new(mv);
            let child_hash = self.keys.hash_after_move(hash, board, &child, mv, kind);

            let mut score = if i == 0 || !self.config.use_pvs {
                -self.negamax(&child, child_hash, depth - 1, -beta, -alpha)
            } else {
                // Janela nula: tenta provar barato que o lance não supera alpha
                -self.negamax(&child, child_hash, depth - 1, -alpha - 1, -alpha)
            };

            // A sonda falhou alto: rebusca com a janela inteira, mas só onde
            // a rebusca ainda compensa
            if self.config.use_pvs && i > 0 && score > best && depth > 2 && score < beta {
                score = -self.negamax(&child, child_hash, depth - 1, -beta, -alpha);
            }

            // O prazo pode ter estourado dentro da subárvore deste lance.
            // Um score truncado não adota lance, não corta e não entra na
            // TT; só subárvores inteiramente buscadas contam.
            if self.time.out_of_time() {
                return best;
            }

            if score > best {
                best = score;
                best_move = Some(mv);
                if is_root {
                    self.root_best = Some(mv);
                }
            }
            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                if !kind.is_capture() {
                    self.killers.insert(depth, mv);
                }
                self.tt
                    .store(hash, depth, best, NodeType::LowerBound, best_move);
                return best;
            }
        }

        let node_type = if best < entry_alpha {
            NodeType::UpperBound
        } else {
            NodeType::Exact
        };
        self.tt.store(hash, depth, best, node_type, best_move);

        best
    }

    fn print_info(&self, depth: Depth, score: Score, elapsed: Duration) {
        let nps = if elapsed.as_millis() > 0 {
            (self.nodes as f64 / elapsed.as_secs_f64()) as u64
        } else {
            0
        };
        println!(
            "info depth {} score cp {} nodes {} nps {} time {}",
            depth,
            score,
            self.nodes,
            nps,
            elapsed.as_millis()
        );
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

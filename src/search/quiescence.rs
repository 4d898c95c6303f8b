use crate::core::board_interface::capture_moves;
use crate::core::Score;
use crate::search::evaluation::Evaluator;
use crate::search::ordering::order_captures;
use crate::search::time_manager::TimeManager;
use chess::Board;

/// Busca quiescente fail-soft: no horizonte, estende apenas as capturas até
/// a posição ficar quieta, para não avaliar no meio de uma troca.
pub fn quiescence_search(
    board: &Board,
    mut alpha: Score,
    beta: Score,
    evaluator: &Evaluator,
    time: &TimeManager,
    nodes: &mut u64,
) -> Score {
    *nodes += 1;

    // Stand-pat: quem joga pode sempre recusar a troca
    let stand_pat = evaluator.evaluate(board);
    if stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut captures = capture_moves(board);
    if captures.is_empty() {
        return stand_pat;
    }
    order_captures(board, &mut captures);

    let mut best = stand_pat;
    for mv in captures {
        if time.out_of_time() {
            return best;
        }

        let child = board.make_move_new(mv);
        let score = -quiescence_search(&child, -beta, -alpha, evaluator, time, nodes);

        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if score >= beta {
            return best;
        }
    }

    best
}

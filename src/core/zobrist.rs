// Zobrist hashing incremental da posição.
//
// As chaves vivem numa instância própria (nunca em estático global): cada
// motor gera as suas uma vez por sessão, e buscas independentes podem
// coexistir com chaves diferentes. Não há garantia de estabilidade entre
// execuções.

use crate::core::board_interface::classify_move;
use crate::core::types::MoveKind;
use chess::{Board, ChessMove, Color, File, Piece, Rank, Square, ALL_SQUARES};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub struct ZobristKeys {
    /// [cor][tipo de peça][casa]
    pieces: [[[u64; 64]; 6]; 2],
    /// [cor][lado do roque] - 0 = ala do rei, 1 = ala da dama
    castling: [[u64; 2]; 2],
    /// Uma chave por coluna da casa de en passant
    en_passant: [u64; 8],
    /// Duas chaves de quem-joga; as duas são invertidas a cada lance
    /// (inclusive no lance nulo), garantindo hashes distintos para a mesma
    /// disposição de peças com cores trocadas.
    side: [u64; 2],
}

impl ZobristKeys {
    pub fn new() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    /// Chaves determinísticas, para testes reproduzíveis.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: RngCore>(rng: &mut R) -> Self {
        let mut keys = ZobristKeys {
            pieces: [[[0; 64]; 6]; 2],
            castling: [[0; 2]; 2],
            en_passant: [0; 8],
            side: [0; 2],
        };

        for color in 0..2 {
            for piece in 0..6 {
                for square in 0..64 {
                    keys.pieces[color][piece][square] = rng.gen();
                }
            }
        }
        for color in 0..2 {
            for castle_side in 0..2 {
                keys.castling[color][castle_side] = rng.gen();
            }
        }
        for file in 0..8 {
            keys.en_passant[file] = rng.gen();
        }
        keys.side[0] = rng.gen();
        keys.side[1] = rng.gen();

        keys
    }

    #[inline(always)]
    fn piece_key(&self, color: Color, piece: Piece, square: Square) -> u64 {
        self.pieces[color.to_index()][piece.to_index()][square.to_index()]
    }

    /// Hash completo da posição, O(peças). Chamado uma vez na raiz da busca;
    /// a partir daí o hash é mantido incrementalmente por `hash_after_move`.
    pub fn hash_from_scratch(&self, board: &Board) -> u64 {
        let mut hash = 0u64;

        for square in ALL_SQUARES {
            if let (Some(piece), Some(color)) = (board.piece_on(square), board.color_on(square)) {
                hash ^= self.piece_key(color, piece, square);
            }
        }

        hash ^= self.side[board.side_to_move().to_index()];
        hash ^= self.rights_keys(board);
        hash
    }

    /// Chaves dos direitos correntes (roques por cor/lado + coluna de en
    /// passant). O delta entre antes/depois de um lance é o XOR das duas.
    fn rights_keys(&self, board: &Board) -> u64 {
        let mut hash = 0u64;

        for color in [Color::White, Color::Black] {
            let rights = board.castle_rights(color);
            if rights.has_kingside() {
                hash ^= self.castling[color.to_index()][0];
            }
            if rights.has_queenside() {
                hash ^= self.castling[color.to_index()][1];
            }
        }

        if let Some(square) = board.en_passant() {
            hash ^= self.en_passant[square.get_file().to_index()];
        }

        hash
    }

    /// Atualização incremental: parte do hash anterior e inverte apenas as
    /// chaves afetadas pelo lance, evitando o recálculo completo.
    pub fn hash_after_move(
        &self,
        prev: u64,
        before: &Board,
        after: &Board,
        mv: ChessMove,
        kind: MoveKind,
    ) -> u64 {
        let mover = before.side_to_move();
        let opponent = !mover;
        let from = mv.get_source();
        let to = mv.get_dest();

        // Sempre: as duas chaves de quem-joga e o delta de direitos.
        let mut hash = prev ^ self.side[0] ^ self.side[1];
        hash ^= self.rights_keys(before) ^ self.rights_keys(after);

        match kind {
            MoveKind::Promotion { capture } => {
                hash ^= self.piece_key(mover, Piece::Pawn, from);
                if let Some(promoted) = mv.get_promotion() {
                    hash ^= self.piece_key(mover, promoted, to);
                }
                if capture {
                    if let Some(victim) = before.piece_on(to) {
                        hash ^= self.piece_key(opponent, victim, to);
                    }
                }
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                // Casas fixas, determinadas só pela cor e pelo lado do roque.
                let rank = match mover {
                    Color::White => Rank::First,
                    Color::Black => Rank::Eighth,
                };
                let (rook_from, king_to, rook_to) = if kind == MoveKind::CastleKingside {
                    (File::H, File::G, File::F)
                } else {
                    (File::A, File::C, File::D)
                };
                hash ^= self.piece_key(mover, Piece::King, Square::make_square(rank, File::E));
                hash ^= self.piece_key(mover, Piece::King, Square::make_square(rank, king_to));
                hash ^= self.piece_key(mover, Piece::Rook, Square::make_square(rank, rook_from));
                hash ^= self.piece_key(mover, Piece::Rook, Square::make_square(rank, rook_to));
            }
            MoveKind::EnPassant => {
                // O peão capturado está na casa imediatamente atrás do destino.
                let behind_rank = match mover {
                    Color::White => Rank::from_index(to.get_rank().to_index() - 1),
                    Color::Black => Rank::from_index(to.get_rank().to_index() + 1),
                };
                let captured = Square::make_square(behind_rank, to.get_file());
                hash ^= self.piece_key(mover, Piece::Pawn, from);
                hash ^= self.piece_key(mover, Piece::Pawn, to);
                hash ^= self.piece_key(opponent, Piece::Pawn, captured);
            }
            MoveKind::Capture | MoveKind::Normal => {
                if let Some(moving) = before.piece_on(from) {
                    hash ^= self.piece_key(mover, moving, from);
                    hash ^= self.piece_key(mover, moving, to);
                }
                if let Some(victim) = before.piece_on(to) {
                    hash ^= self.piece_key(opponent, victim, to);
                }
            }
        }

        hash
    }

    /// Lance nulo (passar a vez): só mudam quem-joga e os direitos
    /// (o en passant deixa de estar disponível).
    pub fn hash_after_null(&self, prev: u64, before: &Board, after: &Board) -> u64 {
        prev ^ self.side[0] ^ self.side[1] ^ self.rights_keys(before) ^ self.rights_keys(after)
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

// Interface UCI (Universal Chess Interface) para o motor Xeque

use chess::{Board, ChessMove};
use std::io::{self, BufRead};
use std::str::FromStr;
use std::thread;
use std::time::Duration;
use xeque::search::{SearchConfig, SearchEngine, StopHandle, TimeControl};
use xeque::EngineError;

struct UciFrontend {
    board: Board,
    stop_handle: Option<StopHandle>,
    search_thread: Option<thread::JoinHandle<()>>,
}

impl UciFrontend {
    fn new() -> Self {
        UciFrontend {
            board: Board::default(),
            stop_handle: None,
            search_thread: None,
        }
    }

    fn run(&mut self) {
        let stdin = io::stdin();

        for line in stdin.lock().lines() {
            let Ok(input) = line else { break };
            let parts: Vec<&str> = input.trim().split_whitespace().collect();

            if parts.is_empty() {
                continue;
            }

            match parts[0] {
                "uci" => self.handle_uci(),
                "isready" => println!("readyok"),
                "ucinewgame" => self.board = Board::default(),
                "position" => {
                    if let Err(e) = self.handle_position(&parts) {
                        eprintln!("info string {}", e);
                    }
                }
                "go" => self.handle_go(&parts),
                "stop" => self.handle_stop(),
                "quit" => break,
                _ => {} // Ignora comandos desconhecidos
            }
        }

        self.handle_stop();
    }

    fn handle_uci(&self) {
        println!("id name Xeque {}", env!("CARGO_PKG_VERSION"));
        println!("id author Xeque team");
        println!("uciok");
    }

    fn handle_position(&mut self, parts: &[&str]) -> Result<(), EngineError> {
        if parts.len() < 2 {
            return Ok(());
        }

        let mut idx = 1;
        match parts[idx] {
            "startpos" => {
                self.board = Board::default();
                idx += 1;
            }
            "fen" => {
                idx += 1;
                let mut fen_parts = Vec::new();
                while idx < parts.len() && parts[idx] != "moves" {
                    fen_parts.push(parts[idx]);
                    idx += 1;
                }
                let fen = fen_parts.join(" ");
                self.board =
                    Board::from_str(&fen).map_err(|_| EngineError::InvalidFen(fen.clone()))?;
            }
            _ => return Ok(()),
        }

        if idx < parts.len() && parts[idx] == "moves" {
            idx += 1;
            while idx < parts.len() {
                self.apply_move(parts[idx])?;
                idx += 1;
            }
        }

        Ok(())
    }

    fn apply_move(&mut self, uci: &str) -> Result<(), EngineError> {
        let mv = ChessMove::from_str(uci)
            .map_err(|_| EngineError::IllegalMove(uci.to_string()))?;
        if !self.board.legal(mv) {
            return Err(EngineError::IllegalMove(uci.to_string()));
        }
        self.board = self.board.make_move_new(mv);
        Ok(())
    }

    fn handle_go(&mut self, parts: &[&str]) {
        // Interrompe qualquer busca anterior
        self.handle_stop();

        let config = SearchConfig::default();
        let mut depth_limit = config.max_depth;
        let mut control = TimeControl::Infinite;

        let mut idx = 1;
        while idx < parts.len() {
            let arg = parts.get(idx + 1).copied();
            match parts[idx] {
                "depth" => {
                    if let Some(d) = arg.and_then(|v| v.parse::<u8>().ok()) {
                        depth_limit = d;
                    }
                    idx += 2;
                }
                "movetime" => {
                    if let Some(ms) = arg.and_then(|v| v.parse::<u64>().ok()) {
                        control = TimeControl::MoveTime(Duration::from_millis(ms));
                    }
                    idx += 2;
                }
                "wtime" | "btime" => {
                    let matches_side = (parts[idx] == "wtime")
                        == (self.board.side_to_move() == chess::Color::White);
                    if matches_side {
                        if let Some(ms) = arg.and_then(|v| v.parse::<u64>().ok()) {
                            // Gasta 2% do tempo restante neste lance
                            control = TimeControl::MoveTime(Duration::from_millis(ms / 50));
                        }
                    }
                    idx += 2;
                }
                "infinite" => {
                    control = TimeControl::Infinite;
                    idx += 1;
                }
                _ => idx += 1,
            }
        }

        let mut engine = SearchEngine::new(config);
        self.stop_handle = Some(engine.stop_handle());

        let board = self.board;
        self.search_thread = Some(thread::spawn(move || {
            match engine.start_search(&board, depth_limit, control) {
                Ok(report) => println!("bestmove {}", report.best_move),
                Err(e) => {
                    log::warn!("busca falhou: {}", e);
                    println!("bestmove 0000");
                }
            }
        }));
    }

    fn handle_stop(&mut self) {
        if let Some(handle) = self.stop_handle.take() {
            handle.stop();
        }
        if let Some(thread) = self.search_thread.take() {
            let _ = thread.join();
        }
    }
}

fn main() {
    env_logger::init();
    let mut engine = UciFrontend::new();
    engine.run();
}

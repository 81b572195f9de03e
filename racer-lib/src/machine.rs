//! The firmware's top-level state machine.
//!
//! Every state has one handler that runs until its exit condition and
//! returns the next state. Handlers share a [`GameContext`] instead of
//! globals; the board is borrowed once for the whole run.

use crate::{
    common::{Board, Button, Buzzer, Controls, Prng, Screen, StatusLed, Timer},
    config::GameConfig,
    game::{Race, TickOutcome},
    log::info,
    menu::{MenuOutcome, SelectionMenu},
    screens::{self, Label},
    settings::{self, Settings, CAR_LABELS, DIFFICULTY_LABELS, MODE_LABELS},
    sound,
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum State {
    Init,
    CmdMenu,
    SelectCar,
    SelectDifficulty,
    SelectMode,
    CmdGame,
    InitGame,
    Game,
    GameOver,
}

/// Session data that outlives a single state.
pub struct GameContext {
    pub config: GameConfig,
    pub settings: Settings,
    /// Best score since the player last went back to the car selection.
    pub record: u16,
    pub race: Option<Race>,
    pub prng: Prng,
}

impl GameContext {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            settings: Settings::default(),
            record: 0,
            race: None,
            prng: Prng::new(seed),
        }
    }

    fn score(&self) -> u16 {
        self.race.as_ref().map_or(0, |race| race.state().score)
    }
}

const CAR_MENU: SelectionMenu<'static> = SelectionMenu::new("Choose your car:", &CAR_LABELS);
const DIFFICULTY_MENU: SelectionMenu<'static> =
    SelectionMenu::new("Select difficulty:", &DIFFICULTY_LABELS).highlighted();
const MODE_MENU: SelectionMenu<'static> =
    SelectionMenu::new("Select drive mode:", &MODE_LABELS).highlighted();

pub struct Machine<'a, S, C, B, L, T> {
    board: Board<'a, S, C, B, L, T>,
    ctx: GameContext,
    pub(crate) state: State,
}

impl<'a, S, C, B, L, T> Machine<'a, S, C, B, L, T>
where
    S: Screen,
    C: Controls,
    B: Buzzer,
    L: StatusLed,
    T: Timer,
{
    pub fn new(board: Board<'a, S, C, B, L, T>, config: GameConfig, seed: u32) -> Self {
        Self {
            board,
            ctx: GameContext::new(config, seed),
            state: State::Init,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Never returns: there is no terminal state.
    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    /// Runs the current state's handler to completion.
    pub async fn step(&mut self) -> State {
        let next = match self.state {
            State::Init => self.init().await,
            State::CmdMenu => self.menu_commands().await,
            State::SelectCar => self.select_car().await,
            State::SelectDifficulty => self.select_difficulty().await,
            State::SelectMode => self.select_mode().await,
            State::CmdGame => self.game_commands().await,
            State::InitGame => self.init_game().await,
            State::Game => self.play().await,
            State::GameOver => self.game_over().await,
        };
        info!("{:?} -> {:?}", self.state, next);
        self.state = next;
        next
    }

    async fn init(&mut self) -> State {
        screens::splash(self.board.screen, &self.ctx.config.geometry);
        self.board.screen.flush();
        sound::play_intro(&mut self.board).await;
        self.board.discard_presses();
        State::CmdMenu
    }

    async fn menu_commands(&mut self) -> State {
        let g = self.ctx.config.geometry;
        screens::menu_commands(self.board.screen, &g);
        self.board.wait_for(Button::S2).await;
        screens::label(self.board.screen, Label::Next, true, &g);
        State::SelectCar
    }

    async fn select_car(&mut self) -> State {
        match CAR_MENU.run(&mut self.board, &self.ctx.config).await {
            MenuOutcome::Back => State::CmdMenu,
            MenuOutcome::Confirm(idx) => {
                self.ctx.settings.car_color = settings::car_color(idx);
                info!("car: {}", CAR_LABELS[idx.min(CAR_LABELS.len() - 1)]);
                State::SelectDifficulty
            }
        }
    }

    async fn select_difficulty(&mut self) -> State {
        match DIFFICULTY_MENU.run(&mut self.board, &self.ctx.config).await {
            MenuOutcome::Back => State::SelectCar,
            MenuOutcome::Confirm(idx) => {
                self.ctx.settings.difficulty = settings::difficulty(idx);
                info!("difficulty: {:?}", self.ctx.settings.difficulty);
                State::SelectMode
            }
        }
    }

    async fn select_mode(&mut self) -> State {
        match MODE_MENU.run(&mut self.board, &self.ctx.config).await {
            MenuOutcome::Back => State::SelectDifficulty,
            MenuOutcome::Confirm(idx) => {
                self.ctx.settings.mode = settings::control_mode(idx);
                info!("drive mode: {:?}", self.ctx.settings.mode);
                State::CmdGame
            }
        }
    }

    async fn game_commands(&mut self) -> State {
        let g = self.ctx.config.geometry;
        screens::game_commands(self.board.screen, &g);
        match self.board.wait_for_button().await {
            Button::S1 => {
                screens::label(self.board.screen, Label::Back, true, &g);
                State::SelectMode
            }
            Button::S2 => {
                screens::label(self.board.screen, Label::Play, true, &g);
                State::InitGame
            }
        }
    }

    async fn init_game(&mut self) -> State {
        let race = Race::new(&self.ctx.settings, &self.ctx.config, &mut self.ctx.prng);
        self.ctx.race = Some(race);
        screens::countdown(&mut self.board, &self.ctx.config.geometry).await;
        self.board.discard_presses();
        State::Game
    }

    async fn play(&mut self) -> State {
        let Some(race) = self.ctx.race.as_mut() else {
            return State::InitGame;
        };
        let next = loop {
            match race.tick(&mut self.board, &mut self.ctx.prng).await {
                TickOutcome::Running => {}
                TickOutcome::Restart => break State::InitGame,
                TickOutcome::Crashed => break State::GameOver,
            }
        };
        // a mode switched in-game sticks for the next race
        self.ctx.settings.mode = race.mode();
        next
    }

    async fn game_over(&mut self) -> State {
        let score = self.ctx.score();
        self.ctx.record = self.ctx.record.max(score);
        info!("game over, score {} record {}", score, self.ctx.record);
        screens::game_over(
            self.board.screen,
            score,
            self.ctx.record,
            &self.ctx.config.geometry,
        );
        self.board.screen.flush();

        match self.board.wait_for_button().await {
            Button::S1 => {
                self.ctx.record = 0;
                State::SelectCar
            }
            Button::S2 => State::InitGame,
        }
    }
}

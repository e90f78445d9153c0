//! Main application state and rendering

use crate::data::{Direction, Item, LocationName};
use crate::game::{ActionOutcome, Game, GameAction, GameOutcome, GamePhase, MessageKind};
use crate::tui::widgets::{CountdownBar, DramaticBox};
use crate::tui::{
    centered_rect, create_bottom_row_layout, create_content_layout, create_main_layout,
    create_top_row_layout, styled_block, tier_color, Theme, HELP_TEXT, INTRO_TEXT, LOGO,
};
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Selection key that undoes the current prompt step
const UNDO_KEY: u32 = 9;
/// In a book chapter, returns to the table of contents
const CONTENTS_KEY: u32 = 8;
/// Completed orders listed on the game-over screen
const RECENT_ORDERS: usize = 10;

/// Application state
pub struct App {
    pub game: Game,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub prompt: Prompt,
    /// Shown under the play area until the next action
    pub warning: Option<String>,
}

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    GameOver,
}

/// What the next digit key answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    None,
    Pickup,
    Trash,
    /// Ingredients stay in the inventory until both are chosen
    Mix { first: Option<usize> },
    Deliver { item: Option<usize> },
    Book { chapter: Option<String> },
}

impl App {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Title,
            prompt: Prompt::None,
            warning: None,
        }
    }

    /// Handle keyboard input
    ///
    /// Never blocks for more than 100ms, and advances the session clock on
    /// every call whether or not a key arrived.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        self.tick(Utc::now());

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, Utc::now());
                }
            }
        }

        Ok(self.running)
    }

    /// Let customers walk out and the night end
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.current_screen != Screen::Playing {
            return;
        }
        if self.game.tick(now).session_ended {
            self.end_session();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: DateTime<Utc>) {
        match self.current_screen {
            Screen::Title => {
                self.game.restart_clock(now);
                self.current_screen = Screen::Playing;
            }
            Screen::GameOver => self.running = false,
            Screen::Playing => {
                if self.show_help {
                    self.show_help = false;
                } else if self.prompt == Prompt::None {
                    self.handle_command_key(code, now);
                } else {
                    self.handle_prompt_key(code, now);
                }
            }
        }
    }

    fn handle_command_key(&mut self, code: KeyCode, now: DateTime<Utc>) {
        self.warning = None;
        match code {
            KeyCode::Up => self.perform(GameAction::Move(Direction::North), now),
            KeyCode::Down => self.perform(GameAction::Move(Direction::South), now),
            KeyCode::Left => self.perform(GameAction::Move(Direction::West), now),
            KeyCode::Right => self.perform(GameAction::Move(Direction::East), now),
            KeyCode::Char('h') => self.perform(GameAction::ReturnHome, now),
            KeyCode::Char('p') => self.open_prompt(self.game.pickup_blocker(), Prompt::Pickup),
            KeyCode::Char('t') => self.open_prompt(self.game.trash_blocker(), Prompt::Trash),
            KeyCode::Char('m') => {
                self.open_prompt(self.game.mix_blocker(), Prompt::Mix { first: None })
            }
            KeyCode::Char('d') => {
                self.open_prompt(self.game.deliver_blocker(), Prompt::Deliver { item: None })
            }
            KeyCode::Char('b') => self.prompt = Prompt::Book { chapter: None },
            KeyCode::Char('q') => self.perform(GameAction::Quit, now),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode, now: DateTime<Utc>) {
        let selection = match code {
            KeyCode::Esc => UNDO_KEY,
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(digit) => digit,
                None => return,
            },
            _ => return,
        };
        self.warning = None;

        if selection == UNDO_KEY {
            self.undo();
            return;
        }
        let index = selection as usize;

        match self.prompt.clone() {
            Prompt::None => {}
            Prompt::Pickup => {
                if index < self.game.current_location().items().len() {
                    self.prompt = Prompt::None;
                    self.perform(GameAction::Pickup(index), now);
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Trash => {
                if index < self.game.player.inventory.len() {
                    self.prompt = Prompt::None;
                    self.perform(GameAction::Trash(index), now);
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Mix { first: None } => {
                if index < self.game.player.inventory.len() {
                    self.prompt = Prompt::Mix { first: Some(index) };
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Mix { first: Some(first) } => {
                if index < self.game.player.inventory.len() && index != first {
                    self.prompt = Prompt::None;
                    self.perform(GameAction::Mix(first, index), now);
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Deliver { item: None } => {
                if index < self.game.player.inventory.len() {
                    self.prompt = Prompt::Deliver { item: Some(index) };
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Deliver { item: Some(item) } => {
                if index < self.game.customers.len() {
                    self.prompt = Prompt::None;
                    self.perform(GameAction::Deliver { item, customer: index }, now);
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Book { chapter: None } => {
                let id = index.to_string();
                if self.game.book.chapters.contains_key(&id) {
                    self.prompt = Prompt::Book { chapter: Some(id) };
                } else {
                    self.invalid_selection();
                }
            }
            Prompt::Book { chapter: Some(_) } => {
                if selection == CONTENTS_KEY {
                    self.prompt = Prompt::Book { chapter: None };
                }
            }
        }
    }

    /// Step back once: a half-finished two-part prompt forgets its first
    /// choice, anything else closes
    fn undo(&mut self) {
        self.prompt = match self.prompt {
            Prompt::Mix { first: Some(_) } => Prompt::Mix { first: None },
            Prompt::Deliver { item: Some(_) } => Prompt::Deliver { item: None },
            _ => Prompt::None,
        };
    }

    fn open_prompt(&mut self, blocker: Option<ActionOutcome>, prompt: Prompt) {
        match blocker {
            Some(outcome) => self.warning = Some(outcome.message()),
            None => self.prompt = prompt,
        }
    }

    fn invalid_selection(&mut self) {
        self.warning = Some(ActionOutcome::InvalidSelection.message());
    }

    fn perform(&mut self, action: GameAction, now: DateTime<Utc>) {
        let outcome = self.game.execute(action, now);
        if outcome.kind() == MessageKind::Warning {
            self.warning = Some(outcome.message());
        }
        if self.game.is_over() {
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        self.prompt = Prompt::None;
        self.show_help = false;
        self.current_screen = Screen::GameOver;
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let now = Utc::now();
        match self.current_screen {
            Screen::Title => self.render_title(frame),
            Screen::Playing => self.render_game(frame, now),
            Screen::GameOver => self.render_game_over(frame),
        }

        // Overlay help if showing
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        let mut lines: Vec<Line> = LOGO
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(self.theme.header))))
            .collect();
        lines.extend(INTRO_TEXT.iter().map(|l| Line::from(*l)));

        let intro = Paragraph::new(lines)
            .style(Style::default().fg(self.theme.fg))
            .wrap(Wrap { trim: false })
            .block(styled_block("The Witching Hour", &self.theme));
        frame.render_widget(intro, area);
    }

    fn render_game(&self, frame: &mut Frame, now: DateTime<Utc>) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0], now);

        let rows = create_content_layout(layout[1]);
        let top = create_top_row_layout(rows[0]);
        self.render_customers(frame, top[0], now);
        self.render_money(frame, top[1]);

        let bottom = create_bottom_row_layout(rows[1]);
        self.render_inventory(frame, bottom[0]);
        self.render_prompt(frame, bottom[1]);
        self.render_location(frame, bottom[2]);

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let block = styled_block("Time until sunrise", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = self.game.clock.display(now);
        let bar = CountdownBar::new(&label, self.game.clock.fraction_left(now))
            .color(self.theme.accent);
        frame.render_widget(bar, Rect { height: inner.height.min(2), ..inner });
    }

    fn render_customers(&self, frame: &mut Frame, area: Rect, now: DateTime<Utc>) {
        let items: Vec<ListItem> = self
            .game
            .customers
            .iter()
            .map(|customer| {
                let secs = customer.time_remaining(now).num_seconds();
                let clock_color = if secs <= 15 {
                    self.theme.alert
                } else if secs <= 30 {
                    self.theme.warning
                } else {
                    self.theme.fg
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {}: ", customer.slot), Style::default().fg(self.theme.border)),
                    Span::styled(
                        format!("{:<20}", customer.order.name),
                        Style::default().fg(tier_color(customer.order.tier)),
                    ),
                    Span::styled(format!("${:<4}", customer.points), Style::default().fg(self.theme.money)),
                    Span::styled(customer.countdown(now), Style::default().fg(clock_color)),
                ]))
            })
            .collect();

        let list = List::new(items).block(styled_block("Customers", &self.theme));
        frame.render_widget(list, area);
    }

    fn render_money(&self, frame: &mut Frame, area: Rect) {
        let stats = &self.game.stats;
        let text = vec![
            Line::from(Span::styled(
                format!("${}", self.game.player.score),
                Style::default().fg(self.theme.money).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Orders filled: {}", stats.orders_filled)),
            Line::from(format!("Walked out:    {}", stats.customers_lost)),
        ];
        let money = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(styled_block("Money", &self.theme));
        frame.render_widget(money, area);
    }

    fn render_inventory(&self, frame: &mut Frame, area: Rect) {
        let chosen = match self.prompt {
            Prompt::Mix { first } => first,
            Prompt::Deliver { item } => item,
            _ => None,
        };
        let player = &self.game.player;
        let items: Vec<ListItem> = player
            .inventory
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut style = Style::default().fg(tier_color(item.tier));
                if chosen == Some(i) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {i}: "), Style::default().fg(self.theme.border)),
                    Span::styled(item.name.clone(), style),
                ]))
            })
            .collect();

        let title = format!("Inventory {}/{}", player.inventory.len(), player.capacity);
        let list = List::new(items).block(styled_block(&title, &self.theme));
        frame.render_widget(list, area);
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let (title, lines) = match &self.prompt {
            Prompt::None => ("Messages", self.message_lines(area)),
            Prompt::Pickup => (
                "Pick up",
                self.choice_lines("Which item will you pick up?", self.game.current_location().items()),
            ),
            Prompt::Trash => (
                "Trash",
                self.choice_lines("Which item will you toss?", &self.game.player.inventory),
            ),
            Prompt::Mix { first: None } => (
                "Mix",
                self.choice_lines("Choose the first ingredient.", &self.game.player.inventory),
            ),
            Prompt::Mix { first: Some(first) } => {
                let name = self.inventory_name(*first);
                (
                    "Mix",
                    self.choice_lines(&format!("Mix the {name} with what?"), &self.game.player.inventory),
                )
            }
            Prompt::Deliver { item: None } => (
                "Deliver",
                self.choice_lines("Which item will you deliver?", &self.game.player.inventory),
            ),
            Prompt::Deliver { item: Some(item) } => {
                let name = self.inventory_name(*item);
                let orders: Vec<Item> = self.game.customers.iter().map(|c| c.order.clone()).collect();
                (
                    "Deliver",
                    self.choice_lines(&format!("Who gets the {name}?"), &orders),
                )
            }
            Prompt::Book { chapter: None } => ("Recipe Book", self.contents_lines()),
            Prompt::Book { chapter: Some(id) } => ("Recipe Book", self.chapter_lines(id)),
        };

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(styled_block(title, &self.theme));
        frame.render_widget(panel, area);
    }

    fn inventory_name(&self, index: usize) -> &str {
        self.game
            .player
            .inventory
            .get(index)
            .map_or("?", |item| item.name.as_str())
    }

    fn message_lines(&self, area: Rect) -> Vec<Line<'static>> {
        let visible = area.height.saturating_sub(2) as usize;
        let log = &self.game.message_log;
        let start = log.len().saturating_sub(visible);
        log[start..]
            .iter()
            .map(|m| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>5} ", self.game.clock.display(m.timestamp)),
                        Style::default().fg(self.theme.border),
                    ),
                    Span::styled(m.message.clone(), Style::default().fg(self.theme.message_color(m.kind))),
                ])
            })
            .collect()
    }

    fn choice_lines(&self, question: &str, items: &[Item]) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                question.to_string(),
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(items.iter().enumerate().map(|(i, item)| {
            Line::from(vec![
                Span::styled(format!(" {i}: "), Style::default().fg(self.theme.border)),
                Span::styled(item.name.clone(), Style::default().fg(tier_color(item.tier))),
            ])
        }));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {UNDO_KEY}: undo"),
            Style::default().fg(self.theme.border),
        )));
        lines
    }

    fn contents_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            "Table of Contents",
            Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
        ))];
        for id in self.game.book.chapter_ids() {
            let title = self.game.book.chapter_title(id).unwrap_or("?");
            lines.push(Line::from(format!(" {id}: {title}")));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {UNDO_KEY}: close the book"),
            Style::default().fg(self.theme.border),
        )));
        lines
    }

    fn chapter_lines(&self, id: &str) -> Vec<Line<'static>> {
        let book = &self.game.book;
        let title = book.chapter_title(id).unwrap_or("?").to_string();
        let mut lines = vec![Line::from(Span::styled(
            title,
            Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
        ))];
        for item in book.chapter(id).unwrap_or_default() {
            let text = match &item.recipe {
                Some(recipe) => format!(
                    " {} {} = {} + {}",
                    item.tier.symbol(),
                    item.name,
                    recipe.ingredients[0],
                    recipe.ingredients[1]
                ),
                None => format!(" {} {}", item.tier.symbol(), item.name),
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(tier_color(item.tier)))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {CONTENTS_KEY}: contents   {UNDO_KEY}: close the book"),
            Style::default().fg(self.theme.border),
        )));
        lines
    }

    fn render_location(&self, frame: &mut Frame, area: Rect) {
        let location = self.game.current_location();
        let mut lines = Vec::new();

        for (direction, neighbor) in &location.neighbors {
            lines.push(Line::from(format!(" {}: {}", direction.code(), neighbor)));
        }
        lines.push(Line::from(""));

        if location.name == LocationName::HOME {
            lines.push(Line::from(Span::styled(
                " Mix your ingredients here.",
                Style::default().fg(self.theme.success),
            )));
        } else if location.name == LocationName::MARKET {
            lines.push(Line::from(Span::styled(
                " Deliver your orders here.",
                Style::default().fg(self.theme.success),
            )));
        }
        for (i, item) in location.items().iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!(" {i}: "), Style::default().fg(self.theme.border)),
                Span::styled(item.name.clone(), Style::default().fg(tier_color(item.tier))),
            ]));
        }

        if let Some(flavor) = &self.game.flavor {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {flavor}"),
                Style::default().fg(self.theme.header).add_modifier(Modifier::ITALIC),
            )));
        }

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(styled_block(location.name.as_str(), &self.theme));
        frame.render_widget(panel, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = match &self.warning {
            Some(warning) => Paragraph::new(format!(" {warning}"))
                .style(Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD)),
            None => Paragraph::new(" ←↑↓→ move | h home | p pickup | t trash | m mix | d deliver | b book | q quit | ? help")
                .style(Style::default().fg(self.theme.fg)),
        };
        frame.render_widget(status.block(styled_block("", &self.theme)), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(51, 21, frame.area());
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(self.theme.fg));
        frame.render_widget(help, popup_area);
    }

    fn render_game_over(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let headline = match self.game.phase {
            GamePhase::GameOver(GameOutcome::Quit) => "You close up shop early.",
            _ => "The sun rises. The night is over.",
        };
        let stats = &self.game.stats;
        let mut lines = vec![
            String::new(),
            headline.to_string(),
            String::new(),
            self.game.player.to_string(),
            String::new(),
            format!("Orders filled:    {}", stats.orders_filled),
            format!("Wrong deliveries: {}", stats.wrong_deliveries),
            format!("Walked out:       {}", stats.customers_lost),
            format!("Brews:            {} ({} fizzled)", stats.items_mixed, stats.failed_mixes),
            String::new(),
        ];
        let recent: Vec<String> = self
            .game
            .player
            .recent_orders(RECENT_ORDERS)
            .map(|item| format!("  {item}"))
            .collect();
        if !recent.is_empty() {
            lines.push("Recent orders:".to_string());
            lines.extend(recent);
            lines.push(String::new());
        }
        lines.push("Press any key to exit".to_string());

        let height = lines.len() as u16 + 2;
        let popup = centered_rect(50, height, area);
        let border = if self.game.player.score > 0 {
            self.theme.money
        } else {
            Color::Red
        };
        frame.render_widget(
            DramaticBox::new("GAME OVER").content(lines).border_color(border),
            popup,
        );
    }
}

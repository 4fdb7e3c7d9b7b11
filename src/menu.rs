//! Main menu, instructions and difficulty select

use tetrs_remix::Difficulty;

/// Menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Instructions,
    DifficultySelect,
}

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub screen: MenuScreen,
    pub selected: usize,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame(Difficulty),
    GoToScreen(MenuScreen),
    Back,
    Quit,
}

impl MenuItem {
    fn new(label: &str, action: MenuAction) -> Self {
        Self {
            label: label.to_string(),
            action,
        }
    }
}

impl Menu {
    /// Main menu; Start uses `difficulty`
    pub fn main_menu(difficulty: Difficulty) -> Self {
        Self {
            screen: MenuScreen::Main,
            selected: 0,
            items: vec![
                MenuItem::new(
                    &format!("Start ({})", difficulty.name()),
                    MenuAction::StartGame(difficulty),
                ),
                MenuItem::new(
                    "Instructions",
                    MenuAction::GoToScreen(MenuScreen::Instructions),
                ),
                MenuItem::new(
                    "Difficulty",
                    MenuAction::GoToScreen(MenuScreen::DifficultySelect),
                ),
                MenuItem::new("Quit", MenuAction::Quit),
            ],
        }
    }

    pub fn instructions() -> Self {
        Self {
            screen: MenuScreen::Instructions,
            selected: 0,
            items: vec![MenuItem::new("Back", MenuAction::Back)],
        }
    }

    /// Difficulty list with `current` preselected
    pub fn difficulty_select(current: Difficulty) -> Self {
        let mut items: Vec<MenuItem> = Difficulty::all()
            .iter()
            .map(|&d| {
                MenuItem::new(
                    &format!("{} - {}", d.name(), d.description()),
                    MenuAction::StartGame(d),
                )
            })
            .collect();
        items.push(MenuItem::new("Back", MenuAction::Back));

        let selected = Difficulty::all()
            .iter()
            .position(|&d| d == current)
            .unwrap_or(0);
        Self {
            screen: MenuScreen::DifficultySelect,
            selected,
            items,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    pub fn select(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }

    pub fn go_to(&mut self, screen: MenuScreen, difficulty: Difficulty) {
        *self = match screen {
            MenuScreen::Main => Self::main_menu(difficulty),
            MenuScreen::Instructions => Self::instructions(),
            MenuScreen::DifficultySelect => Self::difficulty_select(difficulty),
        };
    }

    pub fn go_back(&mut self, difficulty: Difficulty) {
        self.go_to(MenuScreen::Main, difficulty);
    }
}

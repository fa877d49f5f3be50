use termfolio_core::messages::{Key, Msg};
use termfolio_core::{Cell, Grid, Point, Style};

/// A single entry in a [`SelectionMenu`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Unique identifier, used by the host to dispatch a selection.
    pub id: String,
    pub label: String,
    pub description: String,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Key bindings for menu navigation.
#[derive(Debug, Clone)]
pub struct MenuKeys {
    pub up: Vec<Key>,
    pub down: Vec<Key>,
    pub select: Vec<Key>,
    pub exit: Vec<Key>,
}

impl Default for MenuKeys {
    fn default() -> Self {
        Self {
            up: vec![Key::ArrowUp, Key::Char('k')],
            down: vec![Key::ArrowDown, Key::Char('j')],
            select: vec![Key::Enter],
            exit: vec![Key::Escape, Key::Char('q')],
        }
    }
}

/// What a call to [`SelectionMenu::update`] amounted to. The host performs
/// the actual reaction (start a game, dismiss the menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// No meaningful action occurred.
    Pass,
    /// The cursor moved.
    Move,
    /// The item under the cursor was committed.
    Select,
    /// The user abandoned the menu.
    Exit,
}

/// An ordered list of choices with a cyclic cursor.
///
/// Items are displayed in insertion order; the cursor affects only the
/// selection indicator, never the ordering. Every operation is total: on an
/// empty menu, cursor movement and selection are no-ops.
#[derive(Debug, Clone)]
pub struct SelectionMenu {
    title: String,
    hint: String,
    items: Vec<MenuItem>,
    keys: MenuKeys,
    cursor: usize,
}

impl SelectionMenu {
    pub fn new(title: impl Into<String>, hint: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            title: title.into(),
            hint: hint.into(),
            items,
            keys: MenuKeys::default(),
            cursor: 0,
        }
    }

    pub fn with_keys(mut self, keys: MenuKeys) -> Self {
        self.keys = keys;
        self
    }

    // -- cursor --

    /// Move the cursor up one item, wrapping from the first to the last.
    pub fn move_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.items.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Move the cursor down one item, wrapping from the last to the first.
    pub fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = if self.cursor + 1 == self.items.len() {
            0
        } else {
            self.cursor + 1
        };
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The item under the cursor, if any.
    pub fn selected(&self) -> Option<&MenuItem> {
        self.items.get(self.cursor)
    }

    // -- item list --

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    /// Remove the item with the given id, clamping the cursor back into
    /// range. Returns the removed item.
    pub fn remove_item(&mut self, id: &str) -> Option<MenuItem> {
        let idx = self.items.iter().position(|it| it.id == id)?;
        let removed = self.items.remove(idx);
        if self.items.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.items.len() {
            self.cursor = self.items.len() - 1;
        }
        Some(removed)
    }

    /// Replace the label and description of the item with the given id.
    pub fn update_item(
        &mut self,
        id: &str,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        match self.items.iter_mut().find(|it| it.id == id) {
            Some(item) => {
                item.label = label.into();
                item.description = description.into();
                true
            }
            None => false,
        }
    }

    // -- input --

    /// Process an input message and report what happened.
    pub fn update(&mut self, msg: Msg) -> MenuAction {
        let Msg::KeyDown { ref key, .. } = msg else {
            return MenuAction::Pass;
        };

        if self.keys.exit.contains(key) {
            return MenuAction::Exit;
        }
        if self.items.is_empty() {
            return MenuAction::Pass;
        }
        if self.keys.up.contains(key) {
            self.move_up();
            MenuAction::Move
        } else if self.keys.down.contains(key) {
            self.move_down();
            MenuAction::Move
        } else if self.keys.select.contains(key) {
            MenuAction::Select
        } else {
            MenuAction::Pass
        }
    }

    // -- rendering --

    /// Render the menu as plain text: title, hint, then one line per item in
    /// insertion order. The cursor row is marked with `>`; labels are padded
    /// to a fixed-width column.
    pub fn lines(&self) -> Vec<String> {
        let label_w = self
            .items
            .iter()
            .map(|it| it.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = Vec::with_capacity(self.items.len() + 2);
        out.push(self.title.clone());
        out.push(self.hint.clone());
        for (i, item) in self.items.iter().enumerate() {
            let marker = if i == self.cursor { '>' } else { ' ' };
            out.push(format!(
                "{} {:<label_w$}  {}",
                marker, item.label, item.description
            ));
        }
        out
    }

    /// Draw the menu into the given grid view. The cursor row is drawn with
    /// `active`, everything else with `base`.
    pub fn draw(&self, grid: &Grid, base: Style, active: Style) {
        let bounds = grid.bounds();
        for (row, line) in self.lines().iter().enumerate() {
            let y = bounds.min.y + row as i32;
            if y >= bounds.max.y {
                break;
            }
            // Rows 0 and 1 are title and hint.
            let style = if row >= 2 && row - 2 == self.cursor && !self.items.is_empty() {
                active
            } else {
                base
            };
            for x in bounds.min.x..bounds.max.x {
                grid.set(Point::new(x, y), Cell::default().with_style(style));
            }
            for (i, ch) in line.chars().enumerate() {
                let p = Point::new(bounds.min.x + i as i32, y);
                if !grid.contains(p) {
                    break;
                }
                grid.set(p, Cell::default().with_char(ch).with_style(style));
            }
        }
    }
}

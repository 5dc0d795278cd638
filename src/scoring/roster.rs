use chrono::Utc;
use tracing::info;

use crate::error::ScoreError;
use crate::models::{new_id, Game, Player, PlayerForm, RecentList, Team};

fn check_team_name(name: &str) -> Result<String, ScoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScoreError::EmptyTeamName);
    }
    Ok(name.to_string())
}

impl Team {
    pub fn new(name: &str) -> Result<Self, ScoreError> {
        Ok(Self {
            id: new_id(),
            name: check_team_name(name)?,
            players: Vec::new(),
            games: Vec::new(),
            recent_locations: RecentList::default(),
            recent_opponents: RecentList::default(),
            recent_tournaments: RecentList::default(),
            created_at: Utc::now(),
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ScoreError> {
        self.name = check_team_name(name)?;
        Ok(())
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Rejects `form` if its name is blank or its number is worn by anyone
    /// other than `editing`.
    fn check_player_form(&self, form: &PlayerForm, editing: Option<&str>) -> Result<String, ScoreError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ScoreError::EmptyPlayerName);
        }
        if let Some(number) = form.number {
            let taken = self
                .players
                .iter()
                .any(|p| p.number == Some(number) && Some(p.id.as_str()) != editing);
            if taken {
                return Err(ScoreError::DuplicateNumber(number));
            }
        }
        Ok(name.to_string())
    }

    pub fn add_player(&mut self, form: &PlayerForm) -> Result<&Player, ScoreError> {
        let name = self.check_player_form(form, None)?;
        self.players.push(Player {
            id: new_id(),
            name,
            number: form.number,
            is_pitcher: form.is_pitcher,
            photo: None,
        });
        info!(team = %self.id, number = ?form.number, "player added");
        Ok(&self.players[self.players.len() - 1])
    }

    /// Edits a roster entry. Names already captured in games stay as they
    /// were recorded.
    pub fn update_player(&mut self, player_id: &str, form: &PlayerForm) -> Result<&Player, ScoreError> {
        let name = self.check_player_form(form, Some(player_id))?;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| ScoreError::PlayerNotFound(player_id.to_string()))?;
        player.name = name;
        player.number = form.number;
        player.is_pitcher = form.is_pitcher;
        Ok(&*player)
    }

    pub fn remove_player(&mut self, player_id: &str) -> Result<Player, ScoreError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| ScoreError::PlayerNotFound(player_id.to_string()))?;
        Ok(self.players.remove(idx))
    }

    pub fn set_player_photo(&mut self, player_id: &str, reference: String) -> Result<(), ScoreError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| ScoreError::PlayerNotFound(player_id.to_string()))?;
        player.photo = Some(reference);
        Ok(())
    }

    pub fn game(&self, game_id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == game_id)
    }

    pub fn delete_game(&mut self, game_id: &str) -> Result<Game, ScoreError> {
        let idx = self
            .games
            .iter()
            .position(|g| g.id == game_id)
            .ok_or_else(|| ScoreError::GameNotFound(game_id.to_string()))?;
        Ok(self.games.remove(idx))
    }

    /// Runs `action` against one game with the team's roster at hand.
    pub fn with_game<T>(
        &mut self,
        game_id: &str,
        action: impl FnOnce(&mut Game, &[Player]) -> Result<T, ScoreError>,
    ) -> Result<T, ScoreError> {
        let game = self
            .games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or_else(|| ScoreError::GameNotFound(game_id.to_string()))?;
        action(game, &self.players)
    }

    /// Years that have at least one game, newest first.
    pub fn seasons(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.games.iter().map(Game::year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Games played in `year`, oldest first.
    pub fn games_in_season(&self, year: i32) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.games.iter().filter(|g| g.year() == year).collect();
        games.sort_by_key(|g| (g.date, g.created_at));
        games
    }
}

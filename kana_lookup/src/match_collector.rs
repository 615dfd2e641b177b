use super::*;

// Keeps the best `max` matches, highest score first.
// Equal scores never displace an earlier match, so the first-seen candidate wins ties.
pub struct MatchCollector<'a> {
    max: usize,
    matches: &'a mut Vec<Match>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(matches: &'a mut Vec<Match>, max: usize) -> MatchCollector<'a> {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        assert!(matches.is_empty(), "The pre-existing matches vector must be empty.");
        MatchCollector {
            max: max,
            matches: matches,
        }
    }

    // True if the glyph is already filed with at least this score.
    // A weaker existing entry is removed to make way for the new one.
    fn remove_existing_lower(&mut self, mc: &Match) -> bool {
        let ix = match self.matches.iter().position(|x| x.glyph == mc.glyph) {
            Some(ix) => ix,
            None => return false,
        };
        if mc.score <= self.matches[ix].score {
            return true;
        }
        self.matches.remove(ix);
        false
    }

    pub fn file_match(&mut self, mc: Match) {
        // Full, and not strictly better than the current minimum
        if let Some(last) = self.matches.last() {
            if self.matches.len() == self.max && mc.score <= last.score {
                return;
            }
        }
        if self.remove_existing_lower(&mc) {
            return;
        }
        // Insert before the first strictly lower score
        match self.matches.iter().position(|x| x.score < mc.score) {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc),
        }
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }
}

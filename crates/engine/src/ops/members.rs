use uuid::Uuid;

use crate::{EngineError, Event, Member, MemberType, ResultEngine, validate};

impl Event {
    /// Add a member. The name is trimmed and must be unique.
    pub fn add_member(&mut self, name: &str, kind: MemberType) -> ResultEngine<Uuid> {
        let name = validate::member_name(&self.members, name)?;
        let member = Member::new(name, kind);
        let id = member.id;
        tracing::debug!(member = %member.name, kind = kind.as_str(), "member added");
        self.members.push(member);
        self.touch();
        Ok(id)
    }

    /// Remove a member together with everything bearing their name.
    ///
    /// Expenses they paid are deleted (not reassigned) and their contributor
    /// entries are stripped from the remaining expenses.
    pub fn remove_member(&mut self, id: Uuid) -> ResultEngine<Member> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        let member = self.members.remove(index);

        let before = self.expenses.len();
        self.expenses.retain(|e| e.paid_by != member.name);
        let removed_expenses = before - self.expenses.len();

        let mut removed_contributions = 0;
        for expense in &mut self.expenses {
            let before = expense.contributors.len();
            expense.contributors.retain(|c| c.name != member.name);
            removed_contributions += before - expense.contributors.len();
        }

        tracing::debug!(
            member = %member.name,
            removed_expenses,
            removed_contributions,
            "member removed"
        );
        self.touch();
        Ok(member)
    }

    /// `true` if a member bears exactly `name`.
    #[must_use]
    pub fn member_exists(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }
}

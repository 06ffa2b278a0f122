use uuid::Uuid;

use crate::{
    Contributor, EngineError, Event, Expense, Money, NewExpense, ResultEngine, validate,
};

impl Event {
    /// Log an expense paid by an existing member.
    pub fn add_expense(&mut self, cmd: NewExpense) -> ResultEngine<Uuid> {
        validate::expense(&self.members, &cmd)?;

        let NewExpense {
            description,
            amount,
            paid_by,
            notes,
            opt_out,
            date,
        } = cmd;
        let mut expense = Expense::new(description.trim(), amount, paid_by, date);
        expense.notes = notes;
        expense.opt_out = opt_out;

        let id = expense.id;
        tracing::debug!(%id, amount = %expense.amount, paid_by = %expense.paid_by, "expense added");
        self.expenses.push(expense);
        self.touch();
        Ok(id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> ResultEngine<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        let expense = self.expenses.remove(index);
        self.touch();
        Ok(expense)
    }

    pub fn expense(&self, id: Uuid) -> ResultEngine<&Expense> {
        self.expenses
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    /// Attach a direct contribution to an expense.
    ///
    /// Rejected before anything changes when the amount exceeds the remaining
    /// amount of the expense.
    pub fn add_contributor(
        &mut self,
        expense_id: Uuid,
        name: &str,
        amount: Money,
    ) -> ResultEngine<Uuid> {
        validate::contributor(&self.members, self.expense(expense_id)?, name, amount)?;

        let contributor = Contributor::new(name, amount);
        let id = contributor.id;
        if let Some(expense) = self.expenses.iter_mut().find(|e| e.id == expense_id) {
            expense.contributors.push(contributor);
        }
        tracing::debug!(%expense_id, contributor = name, %amount, "contributor added");
        self.touch();
        Ok(id)
    }

    pub fn remove_contributor(
        &mut self,
        expense_id: Uuid,
        contributor_id: Uuid,
    ) -> ResultEngine<Contributor> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(expense_id.to_string()))?;
        let index = expense
            .contributors
            .iter()
            .position(|c| c.id == contributor_id)
            .ok_or_else(|| EngineError::KeyNotFound(contributor_id.to_string()))?;
        let contributor = expense.contributors.remove(index);
        self.touch();
        Ok(contributor)
    }
}

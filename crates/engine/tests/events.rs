use rust_decimal_macros::dec;

use engine::{
    Contributor, EngineError, Event, MemberType, Money, NewExpense,
    settlement::balance_of,
    validate,
};

fn money(value: rust_decimal::Decimal) -> Money {
    Money::new(value)
}

fn trip() -> Event {
    let mut event = Event::new("Trip").unwrap();
    event.add_member("Alice", MemberType::Contributing).unwrap();
    event.add_member("Bob", MemberType::Contributing).unwrap();
    event.add_member("Carol", MemberType::Contributing).unwrap();
    event
}

#[test]
fn new_event_requires_a_name() {
    assert_eq!(
        Event::new("  "),
        Err(EngineError::EmptyName("event name".to_string()))
    );
    let event = Event::new(" Trip ").unwrap();
    assert_eq!(event.name, "Trip");
    assert_eq!(event.created_at, event.last_modified);
}

#[test]
fn mutations_refresh_last_modified() {
    let mut event = trip();
    let before = event.last_modified;
    event.rename("Summer trip").unwrap();
    assert!(event.last_modified >= before);
    assert_eq!(event.name, "Summer trip");
    assert!(event.rename("").is_err());
    assert_eq!(event.name, "Summer trip");
}

#[test]
fn member_names_are_trimmed_and_unique() {
    let mut event = trip();
    assert_eq!(
        event.add_member(" Alice ", MemberType::ReimbursementOnly),
        Err(EngineError::ExistingKey("Alice".to_string()))
    );
    assert!(event.add_member("\t", MemberType::Contributing).is_err());
    event.add_member(" Dana ", MemberType::ReimbursementOnly).unwrap();
    assert!(event.member_exists("Dana"));
    assert!(!event.member_exists("dana"));
    assert_eq!(event.contributing_members().count(), 3);
    assert_eq!(event.reimbursement_members().count(), 1);
}

#[test]
fn expenses_are_validated_before_insertion() {
    let mut event = trip();
    assert!(
        event
            .add_expense(NewExpense::new("Dinner", Money::ZERO, "Alice"))
            .is_err()
    );
    assert!(
        event
            .add_expense(NewExpense::new("Dinner", money(dec!(-5)), "Alice"))
            .is_err()
    );
    assert_eq!(
        event.add_expense(NewExpense::new(" ", money(dec!(5)), "Alice")),
        Err(EngineError::EmptyName("expense description".to_string()))
    );
    assert_eq!(
        event.add_expense(NewExpense::new("Dinner", money(dec!(5)), "Zed")),
        Err(EngineError::KeyNotFound("Zed".to_string()))
    );
    assert!(event.expenses.is_empty());

    let id = event
        .add_expense(
            NewExpense::new("Dinner", validate::amount("42,50").unwrap(), "Alice")
                .notes("pizza")
                .opt_out(true),
        )
        .unwrap();
    let expense = event.expense(id).unwrap();
    assert_eq!(expense.amount, money(dec!(42.50)));
    assert_eq!(expense.notes, "pizza");
    assert!(expense.opt_out);
}

#[test]
fn contributor_cannot_exceed_remaining_amount() {
    let mut event = trip();
    let dinner = event
        .add_expense(NewExpense::new("Dinner", money(dec!(100)), "Alice"))
        .unwrap();
    event
        .add_contributor(dinner, "Bob", money(dec!(70)))
        .unwrap();

    let err = event
        .add_contributor(dinner, "Carol", money(dec!(30.01)))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ContributionExceedsRemaining {
            amount: money(dec!(30.01)),
            remaining: money(dec!(30)),
        }
    );
    let expense = event.expense(dinner).unwrap();
    assert_eq!(expense.contributors.len(), 1);
    assert_eq!(expense.total_contributions(), money(dec!(70)));

    event
        .add_contributor(dinner, "Carol", money(dec!(30)))
        .unwrap();
    let expense = event.expense(dinner).unwrap();
    assert_eq!(expense.total_contributions(), expense.amount);
    assert_eq!(expense.remaining_amount(), Money::ZERO);
}

#[test]
fn contributor_rules_follow_the_member_list() {
    let mut event = trip();
    event.add_member("Dana", MemberType::ReimbursementOnly).unwrap();
    let dinner = event
        .add_expense(NewExpense::new("Dinner", money(dec!(100)), "Alice"))
        .unwrap();
    let gift = event
        .add_expense(NewExpense::new("Gift", money(dec!(20)), "Alice").opt_out(true))
        .unwrap();

    assert!(matches!(
        event.add_contributor(dinner, "Alice", money(dec!(10))),
        Err(EngineError::InvalidContributor(_))
    ));
    assert!(matches!(
        event.add_contributor(dinner, "Dana", money(dec!(10))),
        Err(EngineError::InvalidContributor(_))
    ));
    assert_eq!(
        event.add_contributor(dinner, "Zed", money(dec!(10))),
        Err(EngineError::KeyNotFound("Zed".to_string()))
    );
    assert!(matches!(
        event.add_contributor(gift, "Bob", money(dec!(10))),
        Err(EngineError::InvalidContributor(_))
    ));
    assert!(event.add_contributor(dinner, "Bob", Money::ZERO).is_err());

    event
        .add_contributor(dinner, "Bob", money(dec!(10)))
        .unwrap();
    assert!(matches!(
        event.add_contributor(dinner, "Bob", money(dec!(5))),
        Err(EngineError::InvalidContributor(_))
    ));
}

#[test]
fn removing_a_member_cascades() {
    let mut event = trip();
    let bob = event.members[1].id;

    let dinner = event
        .add_expense(NewExpense::new("Dinner", money(dec!(90)), "Alice"))
        .unwrap();
    event
        .add_contributor(dinner, "Bob", money(dec!(10)))
        .unwrap();
    event
        .add_contributor(dinner, "Carol", money(dec!(5)))
        .unwrap();
    event
        .add_expense(NewExpense::new("Taxi", money(dec!(30)), "Bob"))
        .unwrap();
    event
        .add_expense(NewExpense::new("Museum", money(dec!(15)), "Bob").opt_out(true))
        .unwrap();

    let removed = event.remove_member(bob).unwrap();
    assert_eq!(removed.name, "Bob");
    assert!(!event.member_exists("Bob"));
    assert_eq!(event.expenses.len(), 1);
    assert!(event.expenses.iter().all(|e| e.paid_by != "Bob"));
    let dinner = event.expense(dinner).unwrap();
    assert_eq!(dinner.contributors.len(), 1);
    assert_eq!(dinner.contributors[0].name, "Carol");

    let snapshot = event.snapshot();
    assert_eq!(balance_of(snapshot, "Bob"), Money::ZERO);
    // Alice 90 - 5 received - 45 share; Carol 5 contributed - 45 share.
    assert_eq!(balance_of(snapshot, "Alice"), money(dec!(40)));
    assert_eq!(balance_of(snapshot, "Carol"), money(dec!(-40)));

    assert_eq!(
        event.remove_member(bob),
        Err(EngineError::KeyNotFound(bob.to_string()))
    );
}

#[test]
fn removals_by_id() {
    let mut event = trip();
    let dinner = event
        .add_expense(NewExpense::new("Dinner", money(dec!(90)), "Alice"))
        .unwrap();
    let bob = event
        .add_contributor(dinner, "Bob", money(dec!(10)))
        .unwrap();
    let donation = event.add_donation(money(dec!(12)), " sponsor ").unwrap();
    assert_eq!(event.donations[0].notes, "sponsor");

    assert_eq!(
        event.remove_contributor(dinner, bob).unwrap().amount,
        money(dec!(10))
    );
    assert!(event.remove_contributor(dinner, bob).is_err());
    assert_eq!(event.remove_donation(donation).unwrap().amount, money(dec!(12)));
    assert!(event.donations.is_empty());
    assert_eq!(event.remove_expense(dinner).unwrap().description, "Dinner");
    assert!(event.expense(dinner).is_err());
}

#[test]
fn donations_must_be_positive() {
    let mut event = trip();
    assert!(event.add_donation(Money::ZERO, "").is_err());
    assert!(event.add_donation(money(dec!(-1)), "").is_err());
    assert!(event.donations.is_empty());
}

#[test]
fn snapshot_json_uses_camel_case_and_member_types() {
    let json = r#"{
        "id": "6f1c2a1e-8f55-4f0e-9a43-3d1f0f3b2a10",
        "name": "Imported",
        "createdAt": "2025-07-24T10:00:00Z",
        "lastModified": "2025-07-24T12:00:00Z",
        "members": [
            {"id": "0b7d4a3c-39f7-4c55-a6ad-2f1ea3f1d001", "name": "Alice", "type": "contributing"},
            {"id": "0b7d4a3c-39f7-4c55-a6ad-2f1ea3f1d002", "name": "Bob", "type": "contributing"},
            {"id": "0b7d4a3c-39f7-4c55-a6ad-2f1ea3f1d003", "name": "Dana", "type": "reimbursementOnly"}
        ],
        "expenses": [
            {
                "id": "5a0e1c2b-7d8f-4e6a-9b1c-0d2e3f4a5b01",
                "description": "Dinner",
                "amount": "100.00",
                "paidBy": "Alice",
                "optOut": false,
                "contributors": [
                    {"id": "5a0e1c2b-7d8f-4e6a-9b1c-0d2e3f4a5b02", "name": "Bob", "amount": 10}
                ],
                "date": "2025-07-24T11:00:00Z"
            }
        ],
        "donations": [
            {"id": "5a0e1c2b-7d8f-4e6a-9b1c-0d2e3f4a5b03", "amount": "20", "date": "2025-07-24T11:30:00Z"}
        ]
    }"#;

    let event: Event = serde_json::from_str(json).unwrap();
    assert_eq!(event.members[2].kind, MemberType::ReimbursementOnly);
    assert_eq!(event.expenses[0].notes, "");
    assert!(validate::snapshot(event.snapshot()).is_empty());

    let snapshot = event.snapshot();
    // Share (100 - 20) / 2 = 40.
    assert_eq!(balance_of(snapshot, "Alice"), money(dec!(50)));
    assert_eq!(balance_of(snapshot, "Bob"), money(dec!(-30)));
    assert_eq!(balance_of(snapshot, "Dana"), Money::ZERO);

    let back = serde_json::to_value(&event).unwrap();
    assert_eq!(back["members"][2]["type"], "reimbursementOnly");
    assert_eq!(back["expenses"][0]["paidBy"], "Alice");
    assert_eq!(back["currency"], "USD");
}

#[test]
fn snapshot_audit_reports_broken_data() {
    let mut event = trip();
    let dinner = event
        .add_expense(NewExpense::new("Dinner", money(dec!(50)), "Alice"))
        .unwrap();
    event
        .add_contributor(dinner, "Bob", money(dec!(40)))
        .unwrap();

    // Tamper with the data as an unvalidated outer layer could.
    event.members.push(event.members[0].clone());
    event.expenses[0].contributors[0].amount = money(dec!(60));
    event.expenses[0].paid_by = "Ghost".to_string();

    let issues = validate::snapshot(event.snapshot());
    assert!(issues.contains(&EngineError::ExistingKey("Alice".to_string())));
    assert!(issues.contains(&EngineError::KeyNotFound("Ghost".to_string())));
    assert!(issues.contains(&EngineError::ContributionExceedsRemaining {
        amount: money(dec!(60)),
        remaining: money(dec!(50)),
    }));
}

#[test]
fn snapshot_audit_reports_ineligible_contributors() {
    let mut event = trip();
    event.add_member("Dana", MemberType::ReimbursementOnly).unwrap();
    event
        .add_expense(NewExpense::new("Dinner", money(dec!(100)), "Alice"))
        .unwrap();
    event
        .add_expense(NewExpense::new("Gift", money(dec!(50)), "Alice").opt_out(true))
        .unwrap();
    assert!(validate::snapshot(event.snapshot()).is_empty());

    event.expenses[0]
        .contributors
        .push(Contributor::new("Alice", money(dec!(10))));
    event.expenses[0]
        .contributors
        .push(Contributor::new("Dana", money(dec!(10))));
    event.expenses[1]
        .contributors
        .push(Contributor::new("Bob", money(dec!(40))));

    let issues = validate::snapshot(event.snapshot());
    assert_eq!(issues.len(), 3);
    assert!(issues.contains(&EngineError::InvalidContributor(
        "'Alice' paid the expense".to_string()
    )));
    assert!(issues.contains(&EngineError::InvalidContributor(
        "'Dana' is not a contributing member".to_string()
    )));
    assert!(issues.contains(&EngineError::InvalidContributor(
        "expense 'Gift' is not reimbursable".to_string()
    )));
}

//! Text rendering of the screens

use std::fmt::Write;

use gala_core::model::{Booking, Person, Table};

pub const NO_TABLE: &str = "Aucune table disponible";
pub const NO_IMPACTED_BOOKING: &str = "Aucune réservation impactée";
pub const MAIL_SENT: &str = "Un mail vous a été envoyé sur votre adresse mail de facturation";
pub const REQUEST_RECEIVED: &str = "Votre demande a bien été prise en compte";

pub fn booking_question(table: &Table) -> String {
    format!(
        "Voulez-vous vraiment réserver la table numéro {} : {} ?",
        table.number, table.name
    )
}

pub fn delete_table_question(impacted: &[Booking]) -> String {
    let mut out = String::from("Voulez-vous vraiment supprimer cette table ?\n");
    if impacted.is_empty() {
        out.push_str(NO_IMPACTED_BOOKING);
    } else {
        out.push_str("Les réservations suivantes seront impactées :");
        for booking in impacted {
            let _ = write!(out, "\n  {}", booking_person(booking));
        }
    }
    out
}

/// Recap line of a booking already made
pub fn booking_recap(booking: &Booking) -> String {
    let (number, name) = booking
        .table
        .as_ref()
        .map(|t| (t.number.to_string(), t.name.as_str()))
        .unwrap_or_else(|| ("?".to_string(), ""));
    format!(
        "Vous avez réservé {} place(s) pour la table numéro {} : {}",
        booking.seats_booked, number, name
    )
}

/// Home page content for the logged-in person
pub fn home(person: &Person, booking: Option<&Booking>) -> String {
    if person.is_admin() {
        return format!(
            "Bienvenue {}\nVoir les réservations: gala admin reservations\nGestion des Tables: gala admin tables",
            person.display_name()
        );
    }

    if person.seats_remaining > 0 {
        return format!(
            "Bienvenue {}\nPlaces restantes: {}\nSélectionnez votre table: gala tables",
            person.display_name(),
            person.seats_remaining
        );
    }

    let mut out = format!("Merci\n{}\nVous avez déjà réservé.", REQUEST_RECEIVED);
    if let Some(booking) = booking {
        let _ = write!(out, "\n{}\n{}", booking_recap(booking), MAIL_SENT);
    }
    out
}

/// Confirmation shown right after a booking went through
pub fn booking_done(seats: u32, table: &Table) -> String {
    format!(
        "Merci\n{}\nVous avez réservé {} place(s) pour la table numéro {} : {}\n{}",
        REQUEST_RECEIVED, seats, table.number, table.name, MAIL_SENT
    )
}

pub fn table_list(tables: &[Table]) -> String {
    if tables.is_empty() {
        return NO_TABLE.to_string();
    }

    let mut out = format!("{:>6}  {:<24} {:>15}", "Numéro", "Nom", "Places restantes");
    for table in tables {
        let _ = write!(
            out,
            "\n{:>6}  {:<24} {:>15}",
            table.number,
            table.name,
            table.free_seats()
        );
    }
    out
}

/// Admin table list with capacity and bookings
pub fn table_board(tables: &[Table]) -> String {
    let mut out = format!(
        "{:>6}  {:<24} {:>15} {:>16}",
        "Numéro", "Nom", "Nombre de place", "Places réservées"
    );
    for table in tables {
        let _ = write!(
            out,
            "\n{:>6}  {:<24} {:>15} {:>16}",
            table.number, table.name, table.seats_number, table.total_seats_booked
        );
    }
    out
}

fn booking_person(booking: &Booking) -> String {
    booking
        .person
        .as_ref()
        .map(|p| format!("{} {}", p.first_name, p.last_name).trim().to_string())
        .unwrap_or_default()
}

pub fn reservation_list(bookings: &[Booking]) -> String {
    let mut out = format!(
        "{:>6}  {:<24} {:<20} {:>8}",
        "#", "Famille", "Table", "Places"
    );
    for booking in bookings {
        let table = booking
            .table
            .as_ref()
            .map(|t| format!("{} : {}", t.number, t.name))
            .unwrap_or_default();
        let _ = write!(
            out,
            "\n{:>6}  {:<24} {:<20} {:>8}",
            booking.id,
            booking_person(booking),
            table,
            booking.seats_booked
        );
    }
    out
}

/// Accept `o`, `oui`, `y` and `yes`, in any case
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

//! Domain-to-DTO conversions for the REST layer

use shared::{
    BookingDto, BookingStepDto, ClientProfileDto, ServiceCategory as ServiceCategoryDto,
    ServiceDto, SessionStateResponse, SlotListResponse, SubmitResponse, TimeSlotDto,
};

use crate::domain::booking_flow::BookingStep;
use crate::domain::commands::flow::{SessionSnapshot, SubmitOutcome};
use crate::domain::commands::slots::SlotDay;
use crate::domain::models::{ClientProfile, SavedBooking, Service, ServiceCategory, TimeSlot};
use crate::domain::time_utils::date_key;

pub fn step_to_dto(step: BookingStep) -> BookingStepDto {
    match step {
        BookingStep::Welcome => BookingStepDto::Welcome,
        BookingStep::Login => BookingStepDto::Login,
        BookingStep::Register => BookingStepDto::Register,
        BookingStep::Home => BookingStepDto::Home,
        BookingStep::Services => BookingStepDto::Services,
        BookingStep::DateTime => BookingStepDto::DateTime,
        BookingStep::Details => BookingStepDto::Details,
        BookingStep::Confirmation => BookingStepDto::Confirmation,
        BookingStep::WaitingListConfirmed => BookingStepDto::WaitingListConfirmed,
        BookingStep::ManageList => BookingStepDto::ManageList,
        BookingStep::ClientRegistry => BookingStepDto::ClientRegistry,
    }
}

pub fn service_to_dto(service: &Service) -> ServiceDto {
    ServiceDto {
        id: service.id.clone(),
        name: service.name.clone(),
        price: service.price,
        duration_minutes: service.duration_minutes,
        description: service.description.clone(),
        category: match service.category {
            ServiceCategory::Brows => ServiceCategoryDto::Brows,
            ServiceCategory::Lashes => ServiceCategoryDto::Lashes,
            ServiceCategory::Combo => ServiceCategoryDto::Combo,
        },
    }
}

fn slot_to_dto(slot: &TimeSlot) -> TimeSlotDto {
    TimeSlotDto {
        time: slot.time.clone(),
        available: slot.available,
        waiting_count: slot.waiting_count,
    }
}

pub fn slot_day_to_dto(day: &SlotDay) -> SlotListResponse {
    SlotListResponse {
        date: date_key(day.date),
        working_day: day.working_day,
        slots: day.slots.iter().map(slot_to_dto).collect(),
    }
}

pub fn snapshot_to_dto(snapshot: &SessionSnapshot) -> SessionStateResponse {
    SessionStateResponse {
        session_id: snapshot.session_id,
        step: step_to_dto(snapshot.step),
        service_id: snapshot.service_id.clone(),
        date: snapshot.date.map(date_key),
        time: snapshot.time.clone(),
        is_waiting_list: snapshot.is_waiting_list,
        is_demo_mode: snapshot.is_demo_mode,
        error: snapshot.error.clone(),
    }
}

pub fn submit_outcome_to_dto(outcome: &SubmitOutcome) -> SubmitResponse {
    SubmitResponse {
        step: step_to_dto(outcome.step),
        booking_id: outcome.booking_id,
        is_waiting_list: outcome.is_waiting_list,
        is_demo_mode: outcome.is_demo_mode,
        message: outcome.message.clone(),
    }
}

pub fn booking_to_dto(booking: &SavedBooking) -> BookingDto {
    BookingDto {
        id: booking.id,
        service_name: booking.service_name.clone(),
        date: date_key(booking.date),
        time: booking.time.clone(),
        client_name: booking.client_name.clone(),
        client_phone: booking.client_phone.clone(),
        is_waiting_list: booking.is_waiting_list,
    }
}

pub fn client_to_dto(profile: &ClientProfile) -> ClientProfileDto {
    ClientProfileDto {
        id: profile.id,
        name: profile.name.clone(),
        phone: profile.phone.clone(),
        email: profile.email.clone(),
        registered_at: profile.registered_at.to_rfc3339(),
    }
}

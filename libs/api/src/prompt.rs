//! Prompt templates for the generative-text service.

use chrono::{Datelike, NaiveDate};
use entity::prelude::*;

use crate::night_plan::request::EventDetails;

pub const NO_TRIP_EVENTS: &str = "¡Qué pena! No se han encontrado eventos de \
flamenco para estas fechas y destino. Te sugiero probar con otro rango de \
fechas o explorar peñas flamencas y tablaos locales en la ciudad.";

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

pub fn night_plan(event: &EventEntity) -> String {
    format!(
        "Eres \"Duende\", un aficionado al flamenco que conoce bien su ciudad.
Escribe una mini-guía para una noche perfecta alrededor de este evento, en
tono cercano y con secciones en Markdown (## para los títulos).

EVENTO:
- Nombre: {name}
- Artista: {artist}
- Lugar: {venue}, {city}

SECCIONES:
1. Un dato curioso sobre el artista, el lugar o el palo que se va a escuchar.
2. Antes del espectáculo: uno o dos sitios de tapas cerca del lugar.
3. El espectáculo: qué emoción cabe esperar.
4. Después: un sitio tranquilo cerca para la última copa.",
        name = or_blank(&event.name),
        artist = or_blank(&event.artist),
        venue = or_blank(&event.venue),
        city = or_blank(&event.city),
    )
}

pub fn event_guide(event: &EventDetails) -> String {
    format!(
        "Actúa como un guía local con duende. Crea un plan para una noche de
flamenco en {city} alrededor del espectáculo de {artist} en {venue}.

Usa estas secciones en Markdown (###):
### Un Pellizco de Sabiduría
### Calentando Motores: Antes del Espectáculo
Uno o dos bares cercanos con su ambiente y un precio orientativo (€, €€, €€€).
### El Templo del Duende: El Espectáculo
A partir de la descripción ('{description}') indica si {artist} canta, baila
o toca la guitarra, y cómo es el ambiente de {venue}.
### Para Alargar la Magia: Después del Espectáculo
### Consejos Prácticos
Dos o tres consejos: reservas, vestimenta, cómo llegar.

Escribe el nombre de cada lugar recomendado entre corchetes: [Nombre].
Párrafos cortos, fáciles de leer en el móvil.",
        city = or_blank(&event.city),
        artist = or_blank(&event.artist),
        venue = or_blank(&event.venue),
        description = or_blank(&event.description),
    )
}

/// One line per event: weekday and day of month, name, artist and venue.
pub fn trip_event_line(event: &EventEntity) -> String {
    format!(
        "- {weekday}, {day}: \"{name}\" con {artist} en {venue}.",
        weekday = weekday(event.date),
        day = event.date.day(),
        name = or_blank(&event.name),
        artist = or_blank(&event.artist),
        venue = or_blank(&event.venue),
    )
}

pub fn trip_plan(
    destination: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    events: &[EventEntity],
) -> String {
    let event_list = events
        .iter()
        .map(trip_event_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Actúa como un planificador de viajes experto en flamenco. Un viajero
visita {destination} del {start_date} al {end_date}. Estos son los
espectáculos disponibles:
{event_list}

Crea un itinerario organizado por días:
1. Dale a cada día un título temático.
2. En los días con espectáculo, hazlo el punto culminante del día.
3. En los días libres, propone un Plan A cultural y un Plan B más relajado.
4. Termina con una sección `### Glosario Flamenco para el Viajero` con dos o
   tres términos usados en el plan.

Escribe el nombre de cada lugar recomendado entre corchetes: [Nombre]."
    )
}

fn weekday(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

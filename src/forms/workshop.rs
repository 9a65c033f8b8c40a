use serde::Deserialize;
use validator::Validate;

use crate::domain::types::Email;
use crate::domain::workshop::NewWorkshop;
use crate::forms::{FormError, non_blank};

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a workshop.
pub struct WorkshopForm {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub direccion: Option<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub activo: Option<String>,
}

impl TryFrom<WorkshopForm> for NewWorkshop {
    type Error = FormError;

    fn try_from(form: WorkshopForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = non_blank(form.email)
            .map(Email::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;

        Ok(NewWorkshop {
            nombre: form.nombre.trim().to_string(),
            direccion: non_blank(form.direccion),
            telefono: non_blank(form.telefono),
            email: email.map(String::from),
            activo: form.activo.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchecked_box_means_inactive() {
        let form: WorkshopForm =
            serde_html_form::from_str("nombre=Taller+Norte&direccion=&email=").unwrap();
        let workshop = NewWorkshop::try_from(form).unwrap();

        assert_eq!(workshop.nombre, "Taller Norte");
        assert_eq!(workshop.direccion, None);
        assert_eq!(workshop.email, None);
        assert!(!workshop.activo);
    }

    #[test]
    fn email_is_normalized_or_rejected() {
        let form: WorkshopForm =
            serde_html_form::from_str("nombre=Sur&email=+Info%40Taller.COM+&activo=on").unwrap();
        let workshop = NewWorkshop::try_from(form).unwrap();
        assert_eq!(workshop.email.as_deref(), Some("info@taller.com"));
        assert!(workshop.activo);

        let form: WorkshopForm = serde_html_form::from_str("nombre=Sur&email=nope").unwrap();
        assert!(matches!(
            NewWorkshop::try_from(form),
            Err(FormError::InvalidEmail)
        ));
    }
}

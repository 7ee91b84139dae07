mod contact_form;
mod health_check;
mod helpers;
mod leads;
